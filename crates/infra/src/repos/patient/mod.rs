mod inmemory;
mod postgres;

pub use inmemory::InMemoryPatientRepo;
use mediconnect_domain::{Patient, ID};
pub use postgres::PostgresPatientRepo;

#[async_trait::async_trait]
pub trait IPatientRepo: Send + Sync {
    async fn insert(&self, patient: &Patient) -> anyhow::Result<()>;
    async fn find(&self, patient_id: &ID) -> Option<Patient>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Patient>>;
}
