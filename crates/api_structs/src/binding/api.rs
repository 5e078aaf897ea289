use crate::binding::dtos::ChatBindingDTO;
use mediconnect_domain::{ChatBinding, Patient};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingResponse {
    pub binding: ChatBindingDTO,
}

impl BindingResponse {
    pub fn new(binding: &ChatBinding, patient: &Patient) -> Self {
        Self {
            binding: ChatBindingDTO::new(binding, patient),
        }
    }
}

pub mod verify_binding {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub recipient_id: i64,
        pub email: String,
    }

    pub type APIResponse = BindingResponse;
}

pub mod get_binding {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    pub type APIResponse = BindingResponse;
}
