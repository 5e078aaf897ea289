use crate::doctor::dtos::DoctorDTO;
use mediconnect_domain::{Doctor, MedicalRecord, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDTO {
    pub id: ID,
    /// Formatted clinic-local creation time
    pub record_date: String,
    pub prescriptions: Option<String>,
    pub doctor: DoctorDTO,
}

impl PrescriptionDTO {
    pub fn new(record: &MedicalRecord, doctor: &Doctor, record_date: String) -> Self {
        Self {
            id: record.id.clone(),
            record_date,
            prescriptions: record.prescriptions.clone(),
            doctor: DoctorDTO::new(doctor),
        }
    }
}
