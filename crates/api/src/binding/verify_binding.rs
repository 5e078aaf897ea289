use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use mediconnect_api_structs::verify_binding::*;
use mediconnect_domain::{ChatBinding, Patient};
use mediconnect_infra::MediconnectContext;

pub async fn verify_binding_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = VerifyBindingUseCase {
        recipient_id: body.0.recipient_id,
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.binding, &res.patient)))
        .map_err(MediconnectError::from)
}

/// Resolves an email to a patient and binds the chat recipient to it.
/// Re-verifying is idempotent: the binding is simply overwritten.
#[derive(Debug)]
pub struct VerifyBindingUseCase {
    pub recipient_id: i64,
    pub email: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub binding: ChatBinding,
    pub patient: Patient,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    PatientNotFound(String),
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::PatientNotFound(email) => Self::NotFound(format!(
                "No patient is registered with the email: {}",
                email
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for VerifyBindingUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "VerifyBinding";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let patient = ctx
            .repos
            .patients
            .find_by_email(&self.email)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::PatientNotFound(self.email.clone()))?;

        let binding = ChatBinding::verified(self.recipient_id, &patient.email, patient.id.clone());
        ctx.repos
            .bindings
            .upsert(&binding)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .preferences
            .insert_defaults(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { binding, patient })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediconnect_infra::setup_inmemory_context;

    #[actix_web::test]
    async fn binds_a_recipient_to_a_known_patient() {
        let ctx = setup_inmemory_context();
        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        ctx.repos.patients.insert(&patient).await.unwrap();

        let usecase = VerifyBindingUseCase {
            recipient_id: 42,
            email: "olena@example.com".into(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert!(res.binding.is_verified);
        assert_eq!(res.binding.patient_id, patient.id);

        let preferences = ctx
            .repos
            .preferences
            .find_by_recipient(42)
            .await
            .unwrap()
            .unwrap();
        assert!(preferences.appointment_reminders);
        assert!(preferences.medication_reminders);
    }

    #[actix_web::test]
    async fn unknown_email_is_rejected() {
        let ctx = setup_inmemory_context();
        let usecase = VerifyBindingUseCase {
            recipient_id: 42,
            email: "nobody@example.com".into(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn rebinding_overwrites_the_previous_binding() {
        let ctx = setup_inmemory_context();
        let olena = Patient::new("Olena", "Shevchenko", "olena@example.com");
        let petro = Patient::new("Petro", "Bondarenko", "petro@example.com");
        ctx.repos.patients.insert(&olena).await.unwrap();
        ctx.repos.patients.insert(&petro).await.unwrap();

        let usecase = VerifyBindingUseCase {
            recipient_id: 42,
            email: "olena@example.com".into(),
        };
        execute(usecase, &ctx).await.unwrap();
        let usecase = VerifyBindingUseCase {
            recipient_id: 42,
            email: "petro@example.com".into(),
        };
        execute(usecase, &ctx).await.unwrap();

        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(42)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(binding.patient_id, petro.id);

        // Preferences survive a re-bind, tweaks are not reset.
        let preferences = ctx
            .repos
            .preferences
            .find_by_recipient(42)
            .await
            .unwrap()
            .unwrap();
        assert!(preferences.prescription_alerts);
    }
}
