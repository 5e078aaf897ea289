mod inmemory;
mod postgres;

pub use inmemory::InMemoryDoctorRepo;
use mediconnect_domain::{Doctor, ID};
pub use postgres::PostgresDoctorRepo;

#[async_trait::async_trait]
pub trait IDoctorRepo: Send + Sync {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()>;
    async fn find(&self, doctor_id: &ID) -> Option<Doctor>;
}
