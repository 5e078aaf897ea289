mod inmemory;
mod postgres;

pub use inmemory::InMemoryMedicalRecordRepo;
use mediconnect_domain::{MedicalRecord, ID};
pub use postgres::PostgresMedicalRecordRepo;

#[async_trait::async_trait]
pub trait IMedicalRecordRepo: Send + Sync {
    async fn insert(&self, record: &MedicalRecord) -> anyhow::Result<()>;
    async fn find(&self, record_id: &ID) -> Option<MedicalRecord>;
    /// Records created at or after the given timestamp in millis.
    async fn find_created_after(&self, created_after: i64) -> anyhow::Result<Vec<MedicalRecord>>;
    /// Latest records for a patient, newest first.
    async fn find_recent_by_patient(
        &self,
        patient_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<MedicalRecord>>;
}
