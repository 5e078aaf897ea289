use crate::error::MediconnectError;
use crate::shared::clock::local_now;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::dtos::AppointmentDTO;
use mediconnect_api_structs::get_upcoming_appointments::*;
use mediconnect_domain::{Appointment, Doctor};
use mediconnect_infra::MediconnectContext;

pub async fn get_upcoming_appointments_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetUpcomingAppointmentsUseCase {
        recipient_id: path.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let appointments = res
                .appointments
                .iter()
                .map(|(appointment, doctor)| AppointmentDTO::new(appointment, doctor))
                .collect();
            HttpResponse::Ok().json(APIResponse::new(appointments))
        })
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetUpcomingAppointmentsUseCase {
    pub recipient_id: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointments: Vec<(Appointment, Doctor)>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    RecipientNotVerified(i64),
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::RecipientNotVerified(recipient_id) => Self::NotFound(format!(
                "No verified chat binding exists for recipient: {}",
                recipient_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingAppointmentsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingAppointments";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .filter(|b| b.is_verified)
            .ok_or(UseCaseError::RecipientNotVerified(self.recipient_id))?;

        let today = local_now(ctx).date().format("%Y-%m-%d").to_string();
        let upcoming = ctx
            .repos
            .appointments
            .find_upcoming_by_patient(&binding.patient_id, &today)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut appointments = Vec::with_capacity(upcoming.len());
        for appointment in upcoming {
            let doctor = match ctx.repos.doctors.find(&appointment.doctor_id).await {
                Some(doctor) => doctor,
                None => continue,
            };
            appointments.push((appointment, doctor));
        }

        Ok(UseCaseRes { appointments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use mediconnect_domain::{ChatBinding, Patient};
    use mediconnect_infra::{setup_inmemory_context, ISys};
    use std::sync::Arc;

    struct StaticTimeSys {
        millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    #[actix_web::test]
    async fn lists_only_future_scheduled_appointments_in_order() {
        let mut ctx = setup_inmemory_context();
        ctx.config.clinic_timezone = chrono_tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            millis: NaiveDateTime::parse_from_str("2024-06-09 10:00", "%Y-%m-%d %H:%M")
                .unwrap()
                .and_utc()
                .timestamp_millis(),
        });

        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(9, &patient.email, patient.id.clone()))
            .await
            .unwrap();

        for (date, time) in &[
            ("2024-06-11", "09:00"),
            ("2024-06-10", "14:00"),
            ("2024-06-01", "08:00"),
        ] {
            let appointment = Appointment::new(patient.id.clone(), doctor.id.clone(), date, time);
            ctx.repos.appointments.insert(&appointment).await.unwrap();
        }

        let usecase = GetUpcomingAppointmentsUseCase { recipient_id: 9 };
        let res = execute(usecase, &ctx).await.unwrap();
        let dates: Vec<_> = res
            .appointments
            .iter()
            .map(|(a, _)| a.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2024-06-10", "2024-06-11"]);
    }

    #[actix_web::test]
    async fn unbound_recipient_is_rejected() {
        let ctx = setup_inmemory_context();
        let usecase = GetUpcomingAppointmentsUseCase { recipient_id: 9 };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
