use crate::error::MediconnectError;
use crate::pdf::{render_prescription, transliterate};
use crate::shared::clock::{local_datetime, local_now};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{http::header, web, HttpResponse};
use mediconnect_api_structs::get_prescription_document::*;
use mediconnect_domain::ID;
use mediconnect_infra::MediconnectContext;

pub async fn get_prescription_document_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let usecase = GetPrescriptionDocumentUseCase {
        record_id: path.record_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, "application/pdf"))
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", res.filename),
                ))
                .body(res.document)
        })
        .map_err(MediconnectError::from)
}

#[derive(Debug)]
pub struct GetPrescriptionDocumentUseCase {
    pub record_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub document: Vec<u8>,
    pub filename: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    RecordNotFound(ID),
    RenderError,
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::RecordNotFound(record_id) => {
                Self::NotFound(format!("No medical record exists with id: {}", record_id))
            }
            UseCaseError::RenderError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPrescriptionDocumentUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetPrescriptionDocument";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let record = ctx
            .repos
            .medical_records
            .find(&self.record_id)
            .await
            .ok_or_else(|| UseCaseError::RecordNotFound(self.record_id.clone()))?;
        let patient = ctx
            .repos
            .patients
            .find(&record.patient_id)
            .await
            .ok_or_else(|| UseCaseError::RecordNotFound(self.record_id.clone()))?;
        let doctor = ctx
            .repos
            .doctors
            .find(&record.doctor_id)
            .await
            .ok_or_else(|| UseCaseError::RecordNotFound(self.record_id.clone()))?;

        let record_date = local_datetime(ctx, record.created);
        let generated_at = local_now(ctx);
        let document = render_prescription(&record, &patient, &doctor, record_date, generated_at)
            .map_err(|_| UseCaseError::RenderError)?;
        let filename = format!("prescription_{}.pdf", transliterate(&patient.last_name));

        Ok(UseCaseRes { document, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediconnect_domain::{Doctor, MedicalRecord, Patient};
    use mediconnect_infra::setup_inmemory_context;

    #[actix_web::test]
    async fn renders_a_document_for_an_existing_record() {
        let ctx = setup_inmemory_context();
        let patient = Patient::new("Олена", "Шевченко", "olena@example.com");
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        let mut record = MedicalRecord::new(patient.id.clone(), doctor.id.clone(), 0);
        record.prescriptions = Some("Ibuprofen 200mg".into());
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        ctx.repos.medical_records.insert(&record).await.unwrap();

        let usecase = GetPrescriptionDocumentUseCase {
            record_id: record.id.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert!(res.document.starts_with(b"%PDF"));
        assert_eq!(res.filename, "prescription_Shevchenko.pdf");
    }

    #[actix_web::test]
    async fn missing_record_is_a_clean_error() {
        let ctx = setup_inmemory_context();
        let usecase = GetPrescriptionDocumentUseCase {
            record_id: ID::new(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
