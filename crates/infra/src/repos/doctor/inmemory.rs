use super::IDoctorRepo;
use crate::repos::shared::inmemory_repo::{find, insert};
use mediconnect_domain::{Doctor, ID};
use std::sync::Mutex;

pub struct InMemoryDoctorRepo {
    doctors: Mutex<Vec<Doctor>>,
}

impl InMemoryDoctorRepo {
    pub fn new() -> Self {
        Self {
            doctors: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDoctorRepo for InMemoryDoctorRepo {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()> {
        insert(doctor, &self.doctors);
        Ok(())
    }

    async fn find(&self, doctor_id: &ID) -> Option<Doctor> {
        find(doctor_id, &self.doctors)
    }
}
