use super::IMedicalRecordRepo;
use crate::repos::shared::inmemory_repo::{find, find_by, insert};
use mediconnect_domain::{MedicalRecord, ID};
use std::sync::Mutex;

pub struct InMemoryMedicalRecordRepo {
    records: Mutex<Vec<MedicalRecord>>,
}

impl InMemoryMedicalRecordRepo {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMedicalRecordRepo for InMemoryMedicalRecordRepo {
    async fn insert(&self, record: &MedicalRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn find(&self, record_id: &ID) -> Option<MedicalRecord> {
        find(record_id, &self.records)
    }

    async fn find_created_after(&self, created_after: i64) -> anyhow::Result<Vec<MedicalRecord>> {
        Ok(find_by(&self.records, |r| r.created >= created_after))
    }

    async fn find_recent_by_patient(
        &self,
        patient_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<MedicalRecord>> {
        let mut records = find_by(&self.records, |r| &r.patient_id == patient_id);
        records.sort_by(|a, b| b.created.cmp(&a.created));
        records.truncate(limit as usize);
        Ok(records)
    }
}
