use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::update_preferences::*;
use mediconnect_domain::NotificationPreferences;
use mediconnect_infra::MediconnectContext;

pub async fn update_preferences_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = UpdatePreferencesUseCase {
        recipient_id: path.recipient_id,
        appointment_reminders: body.0.appointment_reminders,
        prescription_alerts: body.0.prescription_alerts,
        medication_reminders: body.0.medication_reminders,
        general_notifications: body.0.general_notifications,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.preferences)))
        .map_err(MediconnectError::from)
}

/// Toggles notification switches for a recipient. Fields left out of the
/// request keep their stored value.
#[derive(Debug)]
pub struct UpdatePreferencesUseCase {
    pub recipient_id: i64,
    pub appointment_reminders: Option<bool>,
    pub prescription_alerts: Option<bool>,
    pub medication_reminders: Option<bool>,
    pub general_notifications: Option<bool>,
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
impl UseCase for UpdatePreferencesUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePreferences";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let mut preferences = ctx
            .repos
            .preferences
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::PreferencesNotFound(self.recipient_id))?;

        if let Some(enabled) = self.appointment_reminders {
            preferences.appointment_reminders = enabled;
        }
        if let Some(enabled) = self.prescription_alerts {
            preferences.prescription_alerts = enabled;
        }
        if let Some(enabled) = self.medication_reminders {
            preferences.medication_reminders = enabled;
        }
        if let Some(enabled) = self.general_notifications {
            preferences.general_notifications = enabled;
        }

        ctx.repos
            .preferences
            .save(&preferences)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { preferences })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mediconnect_infra::setup_inmemory_context;

    #[actix_web::test]
    async fn updates_only_the_provided_switches() {
        let ctx = setup_inmemory_context();
        ctx.repos.preferences.insert_defaults(7).await.unwrap();

        let usecase = UpdatePreferencesUseCase {
            recipient_id: 7,
            appointment_reminders: Some(false),
            prescription_alerts: None,
            medication_reminders: None,
            general_notifications: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert!(!res.preferences.appointment_reminders);
        assert!(res.preferences.prescription_alerts);
        assert!(res.preferences.medication_reminders);
        assert!(res.preferences.general_notifications);
    }

    #[actix_web::test]
    async fn unknown_recipient_is_rejected() {
        let ctx = setup_inmemory_context();
        let usecase = UpdatePreferencesUseCase {
            recipient_id: 7,
            appointment_reminders: Some(false),
            prescription_alerts: None,
            medication_reminders: None,
            general_notifications: None,
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
