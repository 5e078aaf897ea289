use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::get_preferences::*;
use mediconnect_domain::NotificationPreferences;
use mediconnect_infra::MediconnectContext;

pub async fn get_preferences_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetPreferencesUseCase {
        recipient_id: path.recipient_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.preferences)))
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetPreferencesUseCase {
    pub recipient_id: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub preferences: NotificationPreferences,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    PreferencesNotFound(i64),
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::PreferencesNotFound(recipient_id) => Self::NotFound(format!(
                "No notification preferences exist for recipient: {}",
                recipient_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPreferencesUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetPreferences";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let preferences = ctx
            .repos
            .preferences
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::PreferencesNotFound(self.recipient_id))?;

        Ok(UseCaseRes { preferences })
    }
}
