mod inmemory;
mod postgres;

pub use inmemory::InMemoryMedicationScheduleRepo;
use mediconnect_domain::{MedicationSchedule, ID};
pub use postgres::PostgresMedicationScheduleRepo;

#[async_trait::async_trait]
pub trait IMedicationScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &MedicationSchedule) -> anyhow::Result<()>;
    /// All schedules whose active flag is set. The start/end window is
    /// checked by the caller against its notion of today.
    async fn find_active(&self) -> anyhow::Result<Vec<MedicationSchedule>>;
    async fn find_active_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Vec<MedicationSchedule>>;
}
