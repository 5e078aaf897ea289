use super::IPatientRepo;
use chrono::NaiveDate;
use mediconnect_domain::{Patient, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresPatientRepo {
    pool: PgPool,
}

impl PostgresPatientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PatientRaw {
    patient_uid: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: Option<String>,
    phone: Option<String>,
    blood_type: Option<String>,
}

impl From<PatientRaw> for Patient {
    fn from(raw: PatientRaw) -> Self {
        Self {
            id: raw.patient_uid.into(),
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            date_of_birth: raw
                .date_of_birth
                .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").expect("Stored date of birth to be YYYY-MM-DD")),
            phone: raw.phone,
            blood_type: raw.blood_type,
        }
    }
}

#[async_trait::async_trait]
impl IPatientRepo for PostgresPatientRepo {
    async fn insert(&self, patient: &Patient) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO patients
            (patient_uid, first_name, last_name, email, date_of_birth, phone, blood_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(patient.id.inner_ref())
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.email)
        .bind(patient.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(&patient.phone)
        .bind(&patient.blood_type)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, patient_id: &ID) -> Option<Patient> {
        let patient: Option<PatientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM patients
            WHERE patient_uid = $1
            "#,
        )
        .bind(patient_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        patient.map(|p| p.into())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Patient>> {
        let patient: Option<PatientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM patients
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(patient.map(|p| p.into()))
    }
}
