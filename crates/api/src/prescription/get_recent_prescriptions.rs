use crate::error::MediconnectError;
use crate::shared::clock::local_datetime;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::dtos::PrescriptionDTO;
use mediconnect_api_structs::get_recent_prescriptions::*;
use mediconnect_domain::{Doctor, MedicalRecord};
use mediconnect_infra::MediconnectContext;

/// How many prescriptions the listing returns.
const RECENT_PRESCRIPTIONS_LIMIT: i64 = 10;

pub async fn get_recent_prescriptions_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetRecentPrescriptionsUseCase {
        recipient_id: path.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let prescriptions = res
                .prescriptions
                .iter()
                .map(|(record, doctor, record_date)| {
                    PrescriptionDTO::new(record, doctor, record_date.clone())
                })
                .collect();
            HttpResponse::Ok().json(APIResponse::new(prescriptions))
        })
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetRecentPrescriptionsUseCase {
    pub recipient_id: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub prescriptions: Vec<(MedicalRecord, Doctor, String)>,
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
impl UseCase for GetRecentPrescriptionsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetRecentPrescriptions";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .filter(|b| b.is_verified)
            .ok_or(UseCaseError::RecipientNotVerified(self.recipient_id))?;

        let records = ctx
            .repos
            .medical_records
            .find_recent_by_patient(&binding.patient_id, RECENT_PRESCRIPTIONS_LIMIT)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut prescriptions = Vec::new();
        for record in records {
            if !record.has_prescriptions() {
                continue;
            }
            let doctor = match ctx.repos.doctors.find(&record.doctor_id).await {
                Some(doctor) => doctor,
                None => continue,
            };
            let record_date = local_datetime(ctx, record.created)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            prescriptions.push((record, doctor, record_date));
        }

        Ok(UseCaseRes { prescriptions })
    }
}
