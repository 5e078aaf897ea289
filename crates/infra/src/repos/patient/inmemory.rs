use super::IPatientRepo;
use crate::repos::shared::inmemory_repo::{find, find_by, insert};
use mediconnect_domain::{Patient, ID};
use std::sync::Mutex;

pub struct InMemoryPatientRepo {
    patients: Mutex<Vec<Patient>>,
}

impl InMemoryPatientRepo {
    pub fn new() -> Self {
        Self {
            patients: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPatientRepo for InMemoryPatientRepo {
    async fn insert(&self, patient: &Patient) -> anyhow::Result<()> {
        insert(patient, &self.patients);
        Ok(())
    }

    async fn find(&self, patient_id: &ID) -> Option<Patient> {
        find(patient_id, &self.patients)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Patient>> {
        Ok(find_by(&self.patients, |p| p.email == email).into_iter().next())
    }
}
