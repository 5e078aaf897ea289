use super::IMedicalRecordRepo;
use mediconnect_domain::{MedicalRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMedicalRecordRepo {
    pool: PgPool,
}

impl PostgresMedicalRecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MedicalRecordRaw {
    record_uid: Uuid,
    patient_uid: Uuid,
    doctor_uid: Uuid,
    created: i64,
    diagnosis: Option<String>,
    treatment: Option<String>,
    prescriptions: Option<String>,
    notes: Option<String>,
}

impl From<MedicalRecordRaw> for MedicalRecord {
    fn from(raw: MedicalRecordRaw) -> Self {
        Self {
            id: raw.record_uid.into(),
            patient_id: raw.patient_uid.into(),
            doctor_id: raw.doctor_uid.into(),
            created: raw.created,
            diagnosis: raw.diagnosis,
            treatment: raw.treatment,
            prescriptions: raw.prescriptions,
            notes: raw.notes,
        }
    }
}

#[async_trait::async_trait]
impl IMedicalRecordRepo for PostgresMedicalRecordRepo {
    async fn insert(&self, record: &MedicalRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medical_records
            (record_uid, patient_uid, doctor_uid, created, diagnosis, treatment, prescriptions, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.inner_ref())
        .bind(record.patient_id.inner_ref())
        .bind(record.doctor_id.inner_ref())
        .bind(record.created)
        .bind(&record.diagnosis)
        .bind(&record.treatment)
        .bind(&record.prescriptions)
        .bind(&record.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, record_id: &ID) -> Option<MedicalRecord> {
        let record: Option<MedicalRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM medical_records
            WHERE record_uid = $1
            "#,
        )
        .bind(record_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        record.map(|r| r.into())
    }

    async fn find_created_after(&self, created_after: i64) -> anyhow::Result<Vec<MedicalRecord>> {
        let records: Vec<MedicalRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM medical_records
            WHERE created >= $1
            "#,
        )
        .bind(created_after)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<MedicalRecord>> {
        let records: Vec<MedicalRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM medical_records
            WHERE patient_uid = $1
            ORDER BY created DESC
            LIMIT $2
            "#,
        )
        .bind(patient_id.inner_ref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }
}
