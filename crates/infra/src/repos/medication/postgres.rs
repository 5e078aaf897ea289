use super::IMedicationScheduleRepo;
use chrono::NaiveDate;
use mediconnect_domain::{MedicationSchedule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMedicationScheduleRepo {
    pool: PgPool,
}

impl PostgresMedicationScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MedicationScheduleRaw {
    schedule_uid: Uuid,
    patient_uid: Uuid,
    medication_name: String,
    dosage: String,
    frequency: String,
    times_per_day: Option<i64>,
    specific_times: Option<String>,
    start_date: String,
    end_date: Option<String>,
    is_active: bool,
}

fn parse_date(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Stored schedule date to be YYYY-MM-DD")
}

impl From<MedicationScheduleRaw> for MedicationSchedule {
    fn from(raw: MedicationScheduleRaw) -> Self {
        Self {
            id: raw.schedule_uid.into(),
            patient_id: raw.patient_uid.into(),
            medication_name: raw.medication_name,
            dosage: raw.dosage,
            frequency: raw.frequency,
            times_per_day: raw.times_per_day,
            specific_times: raw.specific_times,
            start_date: parse_date(&raw.start_date),
            end_date: raw.end_date.map(|d| parse_date(&d)),
            is_active: raw.is_active,
        }
    }
}

#[async_trait::async_trait]
impl IMedicationScheduleRepo for PostgresMedicationScheduleRepo {
    async fn insert(&self, schedule: &MedicationSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medication_schedules
            (schedule_uid, patient_uid, medication_name, dosage, frequency, times_per_day, specific_times, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(schedule.id.inner_ref())
        .bind(schedule.patient_id.inner_ref())
        .bind(&schedule.medication_name)
        .bind(&schedule.dosage)
        .bind(&schedule.frequency)
        .bind(schedule.times_per_day)
        .bind(&schedule.specific_times)
        .bind(schedule.start_date.format("%Y-%m-%d").to_string())
        .bind(schedule.end_date.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(schedule.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active(&self) -> anyhow::Result<Vec<MedicationSchedule>> {
        let schedules: Vec<MedicationScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM medication_schedules
            WHERE is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(schedules.into_iter().map(|s| s.into()).collect())
    }

    async fn find_active_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Vec<MedicationSchedule>> {
        let schedules: Vec<MedicationScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM medication_schedules
            WHERE patient_uid = $1 AND is_active = TRUE
            "#,
        )
        .bind(patient_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(schedules.into_iter().map(|s| s.into()).collect())
    }
}
