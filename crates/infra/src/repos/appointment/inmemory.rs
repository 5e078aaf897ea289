use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::{find, find_by, insert};
use mediconnect_domain::{Appointment, AppointmentStatus, ID};
use std::sync::Mutex;

pub struct InMemoryAppointmentRepo {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_by_status(&self, status: AppointmentStatus) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_by(&self.appointments, |a| a.status == status))
    }

    async fn find_upcoming_by_patient(
        &self,
        patient_id: &ID,
        from_date: &str,
    ) -> anyhow::Result<Vec<Appointment>> {
        let mut appointments = find_by(&self.appointments, |a| {
            &a.patient_id == patient_id
                && a.status == AppointmentStatus::Scheduled
                && a.date.as_str() >= from_date
        });
        appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        Ok(appointments)
    }
}
