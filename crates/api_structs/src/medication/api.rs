use crate::medication::dtos::MedicationScheduleDTO;
use serde::{Deserialize, Serialize};

pub mod get_medication_schedules {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub schedules: Vec<MedicationScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(schedules: Vec<MedicationScheduleDTO>) -> Self {
            Self { schedules }
        }
    }
}

pub mod add_medication_schedule {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medication_name: String,
        pub dosage: String,
        pub frequency: String,
        #[serde(default)]
        pub times_per_day: Option<i64>,
        #[serde(default)]
        pub specific_times: Option<String>,
        pub start_date: String,
        #[serde(default)]
        pub end_date: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub schedule: MedicationScheduleDTO,
    }

    impl APIResponse {
        pub fn new(schedule: MedicationScheduleDTO) -> Self {
            Self { schedule }
        }
    }
}
