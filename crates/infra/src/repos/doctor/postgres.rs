use super::IDoctorRepo;
use mediconnect_domain::{Doctor, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDoctorRepo {
    pool: PgPool,
}

impl PostgresDoctorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DoctorRaw {
    doctor_uid: Uuid,
    first_name: String,
    last_name: String,
    specialization: String,
    license_number: Option<String>,
    phone: Option<String>,
}

impl From<DoctorRaw> for Doctor {
    fn from(raw: DoctorRaw) -> Self {
        Self {
            id: raw.doctor_uid.into(),
            first_name: raw.first_name,
            last_name: raw.last_name,
            specialization: raw.specialization,
            license_number: raw.license_number,
            phone: raw.phone,
        }
    }
}

#[async_trait::async_trait]
impl IDoctorRepo for PostgresDoctorRepo {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO doctors
            (doctor_uid, first_name, last_name, specialization, license_number, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(doctor.id.inner_ref())
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.specialization)
        .bind(&doctor.license_number)
        .bind(&doctor.phone)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, doctor_id: &ID) -> Option<Doctor> {
        let doctor: Option<DoctorRaw> = sqlx::query_as(
            r#"
            SELECT * FROM doctors
            WHERE doctor_uid = $1
            "#,
        )
        .bind(doctor_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        doctor.map(|d| d.into())
    }
}
