use super::format::prescription_alert_message;
use crate::shared::clock::local_datetime;
use crate::shared::usecase::UseCase;
use mediconnect_infra::MediconnectContext;
use tracing::error;

/// Records created within this trailing window count as new.
const NEW_PRESCRIPTION_WINDOW_MILLIS: i64 = 60 * 60 * 1000;

/// One scan pass over freshly created medical records carrying a
/// prescription. There is no dedup log here: a record created close to the
/// window edge can be picked up by two consecutive passes.
#[derive(Debug, Default)]
pub struct SendPrescriptionAlertsUseCase;

#[derive(Debug)]
pub struct UseCaseRes {
    pub alerts_sent: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendPrescriptionAlertsUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendPrescriptionAlerts";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let now_millis = ctx.sys.get_timestamp_millis();
        let records = ctx
            .repos
            .medical_records
            .find_created_after(now_millis - NEW_PRESCRIPTION_WINDOW_MILLIS)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut alerts_sent = 0;
        for record in records {
            let prescriptions = match &record.prescriptions {
                Some(prescriptions) if record.has_prescriptions() => prescriptions.clone(),
                _ => continue,
            };

            let binding = match ctx
                .repos
                .bindings
                .find_verified_by_patient(&record.patient_id)
                .await
            {
                Ok(Some(binding)) => binding,
                Ok(None) => continue,
                Err(_) => return Err(UseCaseError::StorageError),
            };
            let preferences = match ctx
                .repos
                .preferences
                .find_by_recipient(binding.recipient_id)
                .await
            {
                Ok(Some(preferences)) => preferences,
                Ok(None) => continue,
                Err(_) => return Err(UseCaseError::StorageError),
            };
            if !preferences.prescription_alerts {
                continue;
            }

            let patient = match ctx.repos.patients.find(&record.patient_id).await {
                Some(patient) => patient,
                None => continue,
            };
            let doctor = match ctx.repos.doctors.find(&record.doctor_id).await {
                Some(doctor) => doctor,
                None => continue,
            };

            let record_date = local_datetime(ctx, record.created)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            let message =
                prescription_alert_message(&patient, &doctor, &record_date, &prescriptions);
            match ctx.notifier.send(binding.recipient_id, &message).await {
                Ok(()) => alerts_sent += 1,
                Err(e) => {
                    error!(
                        "Failed to send prescription alert to {}: {:?}",
                        binding.recipient_id, e
                    );
                }
            }
        }

        Ok(UseCaseRes { alerts_sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::NaiveDateTime;
    use mediconnect_domain::{ChatBinding, Doctor, MedicalRecord, Patient};
    use mediconnect_infra::{
        setup_inmemory_context, ISys, InMemoryNotificationSender, MediconnectContext,
    };
    use std::sync::Arc;

    const RECIPIENT: i64 = 3003;

    struct StaticTimeSys {
        millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    fn millis(date_time: &str) -> i64 {
        NaiveDateTime::parse_from_str(date_time, "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    struct TestContext {
        ctx: MediconnectContext,
        sender: Arc<InMemoryNotificationSender>,
        patient: Patient,
        doctor: Doctor,
    }

    async fn setup(now: &str) -> TestContext {
        let mut ctx = setup_inmemory_context();
        ctx.config.clinic_timezone = chrono_tz::UTC;
        let sender = Arc::new(InMemoryNotificationSender::new());
        ctx.notifier = sender.clone();
        ctx.sys = Arc::new(StaticTimeSys { millis: millis(now) });

        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(RECIPIENT, &patient.email, patient.id.clone()))
            .await
            .unwrap();
        ctx.repos.preferences.insert_defaults(RECIPIENT).await.unwrap();

        TestContext {
            ctx,
            sender,
            patient,
            doctor,
        }
    }

    async fn insert_record(test: &TestContext, created: &str, prescriptions: Option<&str>) {
        let mut record = MedicalRecord::new(
            test.patient.id.clone(),
            test.doctor.id.clone(),
            millis(created),
        );
        record.prescriptions = prescriptions.map(|p| p.to_string());
        test.ctx.repos.medical_records.insert(&record).await.unwrap();
    }

    #[actix_web::test]
    async fn only_records_inside_the_trailing_hour_are_alerted() {
        let test = setup("2024-06-10 12:00").await;
        // 59 minutes old: inside the window. 61 minutes old: outside.
        insert_record(&test, "2024-06-10 11:01", Some("Ibuprofen 200mg")).await;
        insert_record(&test, "2024-06-10 10:59", Some("Paracetamol 500mg")).await;

        let res = execute(SendPrescriptionAlertsUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.alerts_sent, 1);
        let sent = test.sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("Ibuprofen 200mg"));
    }

    #[actix_web::test]
    async fn records_without_prescriptions_are_skipped() {
        let test = setup("2024-06-10 12:00").await;
        insert_record(&test, "2024-06-10 11:30", None).await;
        insert_record(&test, "2024-06-10 11:30", Some("   ")).await;

        let res = execute(SendPrescriptionAlertsUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.alerts_sent, 0);
    }

    #[actix_web::test]
    async fn disabled_preference_blocks_alerts() {
        let test = setup("2024-06-10 12:00").await;
        insert_record(&test, "2024-06-10 11:30", Some("Ibuprofen 200mg")).await;
        let mut preferences = test
            .ctx
            .repos
            .preferences
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .unwrap();
        preferences.prescription_alerts = false;
        test.ctx.repos.preferences.save(&preferences).await.unwrap();

        let res = execute(SendPrescriptionAlertsUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.alerts_sent, 0);
    }

    #[actix_web::test]
    async fn consecutive_passes_can_redeliver_the_same_record() {
        // There is no dedup log for prescription alerts; two passes inside
        // the record's one hour window both deliver.
        let test = setup("2024-06-10 12:00").await;
        insert_record(&test, "2024-06-10 11:30", Some("Ibuprofen 200mg")).await;

        for _ in 0..2 {
            let res = execute(SendPrescriptionAlertsUseCase::default(), &test.ctx)
                .await
                .unwrap();
            assert_eq!(res.alerts_sent, 1);
        }
        assert_eq!(test.sender.sent_messages().len(), 2);
    }
}
