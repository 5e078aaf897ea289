use super::IMedicationScheduleRepo;
use crate::repos::shared::inmemory_repo::{find_by, insert};
use mediconnect_domain::{MedicationSchedule, ID};
use std::sync::Mutex;

pub struct InMemoryMedicationScheduleRepo {
    schedules: Mutex<Vec<MedicationSchedule>>,
}

impl InMemoryMedicationScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationScheduleRepo for InMemoryMedicationScheduleRepo {
    async fn insert(&self, schedule: &MedicationSchedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn find_active(&self) -> anyhow::Result<Vec<MedicationSchedule>> {
        Ok(find_by(&self.schedules, |s| s.is_active))
    }

    async fn find_active_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Vec<MedicationSchedule>> {
        Ok(find_by(&self.schedules, |s| {
            s.is_active && &s.patient_id == patient_id
        }))
    }
}
