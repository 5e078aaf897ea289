use mediconnect_domain::{ChatBinding, Patient, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PatientDTO {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PatientDTO {
    pub fn new(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            email: patient.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatBindingDTO {
    pub recipient_id: i64,
    pub email: String,
    pub is_verified: bool,
    pub patient: PatientDTO,
}

impl ChatBindingDTO {
    pub fn new(binding: &ChatBinding, patient: &Patient) -> Self {
        Self {
            recipient_id: binding.recipient_id,
            email: binding.email.clone(),
            is_verified: binding.is_verified,
            patient: PatientDTO::new(patient),
        }
    }
}
