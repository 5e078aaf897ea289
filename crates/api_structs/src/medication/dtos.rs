use mediconnect_domain::{MedicationSchedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MedicationScheduleDTO {
    pub id: ID,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub times_per_day: Option<i64>,
    pub specific_times: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: bool,
}

impl MedicationScheduleDTO {
    pub fn new(schedule: &MedicationSchedule) -> Self {
        Self {
            id: schedule.id.clone(),
            medication_name: schedule.medication_name.clone(),
            dosage: schedule.dosage.clone(),
            frequency: schedule.frequency.clone(),
            times_per_day: schedule.times_per_day,
            specific_times: schedule.specific_times.clone(),
            start_date: schedule.start_date.format("%Y-%m-%d").to_string(),
            end_date: schedule.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            is_active: schedule.is_active,
        }
    }
}
