mod inmemory;
mod postgres;

pub use inmemory::InMemoryAppointmentRepo;
use mediconnect_domain::{Appointment, AppointmentStatus, ID};
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn find_by_status(&self, status: AppointmentStatus) -> anyhow::Result<Vec<Appointment>>;
    /// Scheduled appointments for a patient on `from_date` or later, ordered
    /// by date and time.
    async fn find_upcoming_by_patient(
        &self,
        patient_id: &ID,
        from_date: &str,
    ) -> anyhow::Result<Vec<Appointment>>;
}
