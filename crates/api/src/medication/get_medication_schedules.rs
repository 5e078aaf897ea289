use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::dtos::MedicationScheduleDTO;
use mediconnect_api_structs::get_medication_schedules::*;
use mediconnect_domain::MedicationSchedule;
use mediconnect_infra::MediconnectContext;

pub async fn get_medication_schedules_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetMedicationSchedulesUseCase {
        recipient_id: path.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let schedules = res
                .schedules
                .iter()
                .map(MedicationScheduleDTO::new)
                .collect();
            HttpResponse::Ok().json(APIResponse::new(schedules))
        })
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetMedicationSchedulesUseCase {
    pub recipient_id: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub schedules: Vec<MedicationSchedule>,
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
impl UseCase for GetMedicationSchedulesUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetMedicationSchedules";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .filter(|b| b.is_verified)
            .ok_or(UseCaseError::RecipientNotVerified(self.recipient_id))?;

        let schedules = ctx
            .repos
            .medications
            .find_active_by_patient(&binding.patient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { schedules })
    }
}
