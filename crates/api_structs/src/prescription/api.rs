use crate::prescription::dtos::PrescriptionDTO;
use mediconnect_domain::ID;
use serde::{Deserialize, Serialize};

pub mod get_recent_prescriptions {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub prescriptions: Vec<PrescriptionDTO>,
    }

    impl APIResponse {
        pub fn new(prescriptions: Vec<PrescriptionDTO>) -> Self {
            Self { prescriptions }
        }
    }
}

pub mod get_prescription_document {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub record_id: ID,
    }
}
