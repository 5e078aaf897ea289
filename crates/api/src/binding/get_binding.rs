use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::get_binding::*;
use mediconnect_domain::{ChatBinding, Patient};
use mediconnect_infra::MediconnectContext;

pub async fn get_binding_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetBindingUseCase {
        recipient_id: path.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.binding, &res.patient)))
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetBindingUseCase {
    pub recipient_id: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub binding: ChatBinding,
    pub patient: Patient,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    BindingNotFound(i64),
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::BindingNotFound(recipient_id) => Self::NotFound(format!(
                "No chat binding exists for recipient: {}",
                recipient_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBindingUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetBinding";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::BindingNotFound(self.recipient_id))?;
        let patient = ctx
            .repos
            .patients
            .find(&binding.patient_id)
            .await
            .ok_or(UseCaseError::BindingNotFound(self.recipient_id))?;

        Ok(UseCaseRes { binding, patient })
    }
}
