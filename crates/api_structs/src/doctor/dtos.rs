use mediconnect_domain::{Doctor, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDTO {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

impl DoctorDTO {
    pub fn new(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            first_name: doctor.first_name.clone(),
            last_name: doctor.last_name.clone(),
            specialization: doctor.specialization.clone(),
        }
    }
}
