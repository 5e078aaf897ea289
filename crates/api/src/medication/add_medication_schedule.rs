use crate::error::MediconnectError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use mediconnect_api_structs::add_medication_schedule::*;
use mediconnect_api_structs::dtos::MedicationScheduleDTO;
use mediconnect_domain::{date::is_valid_date, MedicationSchedule};
use mediconnect_infra::MediconnectContext;

pub async fn add_medication_schedule_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let body = body.0;
    let usecase = AddMedicationScheduleUseCase {
        recipient_id: path.recipient_id,
        medication_name: body.medication_name,
        dosage: body.dosage,
        frequency: body.frequency,
        times_per_day: body.times_per_day,
        specific_times: body.specific_times,
        start_date: body.start_date,
        end_date: body.end_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(MedicationScheduleDTO::new(&res.schedule)))
        })
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct AddMedicationScheduleUseCase {
    pub recipient_id: i64,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub times_per_day: Option<i64>,
    pub specific_times: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub schedule: MedicationSchedule,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    RecipientNotVerified(i64),
    InvalidDate(String),
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::RecipientNotVerified(recipient_id) => Self::NotFound(format!(
                "No verified chat binding exists for recipient: {}",
                recipient_id
            )),
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date provided, expected YYYY-MM-DD: {}",
                date
            )),
        }
    }
}

fn parse_date(datestr: &str) -> Result<NaiveDate, UseCaseError> {
    let (year, month, day) =
        is_valid_date(datestr).map_err(|_| UseCaseError::InvalidDate(datestr.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| UseCaseError::InvalidDate(datestr.to_string()))
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddMedicationScheduleUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "AddMedicationSchedule";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(self.recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .filter(|b| b.is_verified)
            .ok_or(UseCaseError::RecipientNotVerified(self.recipient_id))?;

        let start_date = parse_date(&self.start_date)?;
        let end_date = match &self.end_date {
            Some(end_date) => Some(parse_date(end_date)?),
            None => None,
        };

        let mut schedule = MedicationSchedule::new(
            binding.patient_id.clone(),
            &self.medication_name,
            &self.dosage,
            &self.frequency,
            start_date,
        );
        schedule.times_per_day = self.times_per_day;
        schedule.specific_times = self.specific_times.clone();
        schedule.end_date = end_date;

        ctx.repos
            .medications
            .insert(&schedule)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { schedule })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediconnect_domain::{ChatBinding, Patient};
    use mediconnect_infra::setup_inmemory_context;

    fn usecase(recipient_id: i64) -> AddMedicationScheduleUseCase {
        AddMedicationScheduleUseCase {
            recipient_id,
            medication_name: "Ibuprofen".into(),
            dosage: "1 tablet".into(),
            frequency: "Daily".into(),
            times_per_day: Some(2),
            specific_times: None,
            start_date: "2024-06-01".into(),
            end_date: None,
        }
    }

    #[actix_web::test]
    async fn adds_a_schedule_for_a_verified_recipient() {
        let ctx = setup_inmemory_context();
        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(5, &patient.email, patient.id.clone()))
            .await
            .unwrap();

        let res = execute(usecase(5), &ctx).await.unwrap();
        assert_eq!(res.schedule.patient_id, patient.id);
        assert!(res.schedule.is_active);

        let stored = ctx
            .repos
            .medications
            .find_active_by_patient(&patient.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[actix_web::test]
    async fn invalid_dates_are_rejected() {
        let ctx = setup_inmemory_context();
        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(5, &patient.email, patient.id.clone()))
            .await
            .unwrap();

        let mut bad = usecase(5);
        bad.start_date = "2024-02-30".into();
        assert!(execute(bad, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn unverified_recipient_is_rejected() {
        let ctx = setup_inmemory_context();
        assert!(execute(usecase(5), &ctx).await.is_err());
    }
}
