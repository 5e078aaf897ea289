use crate::doctor::dtos::DoctorDTO;
use mediconnect_domain::{Appointment, Doctor, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub date: String,
    pub time: String,
    pub duration: i64,
    pub status: String,
    pub doctor: DoctorDTO,
}

impl AppointmentDTO {
    pub fn new(appointment: &Appointment, doctor: &Doctor) -> Self {
        Self {
            id: appointment.id.clone(),
            date: appointment.date.clone(),
            time: appointment.time_of_day().to_string(),
            duration: appointment.duration,
            status: appointment.status.to_string(),
            doctor: DoctorDTO::new(doctor),
        }
    }
}
