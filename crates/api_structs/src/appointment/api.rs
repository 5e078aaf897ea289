use crate::appointment::dtos::AppointmentDTO;
use serde::{Deserialize, Serialize};

pub mod get_upcoming_appointments {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub appointments: Vec<AppointmentDTO>,
    }

    impl APIResponse {
        pub fn new(appointments: Vec<AppointmentDTO>) -> Self {
            Self { appointments }
        }
    }
}
