use super::IAppointmentRepo;
use mediconnect_domain::{Appointment, AppointmentStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    patient_uid: Uuid,
    doctor_uid: Uuid,
    appointment_date: String,
    appointment_time: String,
    duration: i64,
    status: String,
}

impl From<AppointmentRaw> for Appointment {
    fn from(raw: AppointmentRaw) -> Self {
        Self {
            id: raw.appointment_uid.into(),
            patient_id: raw.patient_uid.into(),
            doctor_id: raw.doctor_uid.into(),
            date: raw.appointment_date,
            time: raw.appointment_time,
            duration: raw.duration,
            status: raw
                .status
                .parse()
                .expect("Stored appointment status to be valid"),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
            (appointment_uid, patient_uid, doctor_uid, appointment_date, appointment_time, duration, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.patient_id.inner_ref())
        .bind(appointment.doctor_id.inner_ref())
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(appointment.duration)
        .bind(appointment.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        let appointment: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        appointment.map(|a| a.into())
    }

    async fn find_by_status(&self, status: AppointmentStatus) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    async fn find_upcoming_by_patient(
        &self,
        patient_id: &ID,
        from_date: &str,
    ) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments
            WHERE patient_uid = $1 AND status = 'scheduled' AND appointment_date >= $2
            ORDER BY appointment_date, appointment_time
            "#,
        )
        .bind(patient_id.inner_ref())
        .bind(from_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }
}
