use super::format::appointment_reminder_message;
use crate::shared::clock::local_now;
use crate::shared::usecase::UseCase;
use mediconnect_domain::{AppointmentStatus, ReminderKind, ReminderLogEntry};
use mediconnect_infra::MediconnectContext;
use tracing::{error, warn};

/// One scan pass over scheduled appointments. Fires the 24h reminder while
/// the appointment is 24-25 hours away and the 1h reminder while it is 1-2
/// hours away, each at most once per appointment per calendar day.
#[derive(Debug, Default)]
pub struct SendAppointmentRemindersUseCase;

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminders_sent: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAppointmentRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendAppointmentReminders";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let now = local_now(ctx);
        let today = now.date().format("%Y-%m-%d").to_string();

        let appointments = ctx
            .repos
            .appointments
            .find_by_status(AppointmentStatus::Scheduled)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut reminders_sent = 0;
        for appointment in appointments {
            let binding = match ctx
                .repos
                .bindings
                .find_verified_by_patient(&appointment.patient_id)
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
            if !preferences.appointment_reminders {
                continue;
            }

            let start = match appointment.start_datetime() {
                Ok(start) => start,
                Err(e) => {
                    warn!(
                        "Skipping appointment {} with malformed date/time: {}",
                        appointment.id, e
                    );
                    continue;
                }
            };
            let hours_until = (start - now).num_seconds() as f64 / 3600.0;
            let kind = match ReminderKind::for_hours_until(hours_until) {
                Some(kind) => kind,
                None => continue,
            };

            let already_sent = ctx
                .repos
                .reminder_log
                .find_kinds_for_day(&appointment.id, &today)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if already_sent.contains(&kind) {
                continue;
            }

            let patient = match ctx.repos.patients.find(&appointment.patient_id).await {
                Some(patient) => patient,
                None => continue,
            };
            let doctor = match ctx.repos.doctors.find(&appointment.doctor_id).await {
                Some(doctor) => doctor,
                None => continue,
            };

            let message =
                appointment_reminder_message(&patient, &doctor, &appointment, kind.window_label());
            match ctx.notifier.send(binding.recipient_id, &message).await {
                Ok(()) => {
                    let entry = ReminderLogEntry {
                        appointment_id: appointment.id.clone(),
                        patient_id: appointment.patient_id.clone(),
                        kind,
                        sent_on: today.clone(),
                        sent_at: ctx.sys.get_timestamp_millis(),
                    };
                    if let Err(e) = ctx.repos.reminder_log.insert(&entry).await {
                        error!(
                            "Failed to log {} reminder for appointment {}: {:?}",
                            kind, appointment.id, e
                        );
                    }
                    reminders_sent += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to send appointment reminder to {}: {:?}",
                        binding.recipient_id, e
                    );
                }
            }
        }

        Ok(UseCaseRes { reminders_sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::NaiveDateTime;
    use mediconnect_domain::{
        Appointment, AppointmentStatus, ChatBinding, Doctor, Patient,
    };
    use mediconnect_infra::{
        setup_inmemory_context, INotificationSender, ISys, InMemoryNotificationSender,
        MediconnectContext,
    };
    use std::sync::Arc;

    const RECIPIENT: i64 = 1001;

    struct StaticTimeSys {
        millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    struct FailingNotificationSender;
    #[async_trait::async_trait]
    impl INotificationSender for FailingNotificationSender {
        async fn send(&self, _recipient_id: i64, _text: &str) -> anyhow::Result<()> {
            Err(anyhow::Error::msg("transport down"))
        }
        async fn send_document(
            &self,
            _recipient_id: i64,
            _document: Vec<u8>,
            _filename: &str,
            _caption: &str,
        ) -> anyhow::Result<()> {
            Err(anyhow::Error::msg("transport down"))
        }
    }

    fn millis(date_time: &str) -> i64 {
        NaiveDateTime::parse_from_str(date_time, "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn set_now(ctx: &mut MediconnectContext, date_time: &str) {
        ctx.sys = Arc::new(StaticTimeSys {
            millis: millis(date_time),
        });
    }

    struct TestContext {
        ctx: MediconnectContext,
        sender: Arc<InMemoryNotificationSender>,
        appointment: Appointment,
    }

    async fn setup(appointment_date: &str, appointment_time: &str, now: &str) -> TestContext {
        let mut ctx = setup_inmemory_context();
        ctx.config.clinic_timezone = chrono_tz::UTC;
        let sender = Arc::new(InMemoryNotificationSender::new());
        ctx.notifier = sender.clone();
        set_now(&mut ctx, now);

        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        let appointment = Appointment::new(
            patient.id.clone(),
            doctor.id.clone(),
            appointment_date,
            appointment_time,
        );
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        ctx.repos.appointments.insert(&appointment).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(RECIPIENT, &patient.email, patient.id.clone()))
            .await
            .unwrap();
        ctx.repos.preferences.insert_defaults(RECIPIENT).await.unwrap();

        TestContext {
            ctx,
            sender,
            appointment,
        }
    }

    #[actix_web::test]
    async fn fires_24h_reminder_once_per_day() {
        let mut test = setup("2024-06-10", "14:00", "2024-06-09 13:45").await;

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 1);
        let sent = test.sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, RECIPIENT);
        assert!(sent[0].text.contains("24 hours"));

        // Five minutes later the appointment is still inside [24, 25) but
        // the log entry for today blocks a second delivery.
        set_now(&mut test.ctx, "2024-06-09 13:50");
        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 0);
        assert_eq!(test.sender.sent_messages().len(), 1);
    }

    #[actix_web::test]
    async fn stays_silent_outside_both_windows() {
        let test = setup("2024-06-10", "14:00", "2024-06-09 14:30").await;

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 0);
        assert!(test.sender.sent_messages().is_empty());
    }

    #[actix_web::test]
    async fn fires_1h_reminder_independent_of_24h_log() {
        let test = setup("2024-06-10", "14:00", "2024-06-10 12:30").await;
        test.ctx
            .repos
            .reminder_log
            .insert(&ReminderLogEntry {
                appointment_id: test.appointment.id.clone(),
                patient_id: test.appointment.patient_id.clone(),
                kind: ReminderKind::TwentyFourHours,
                sent_on: "2024-06-10".into(),
                sent_at: 0,
            })
            .await
            .unwrap();

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 1);
        let sent = test.sender.sent_messages();
        assert!(sent[0].text.contains("1 hour"));
    }

    #[actix_web::test]
    async fn malformed_time_is_skipped_without_aborting_the_pass() {
        let test = setup("2024-06-10", "garbage", "2024-06-09 13:45").await;
        // A second, valid appointment inside the 24h window for the same
        // patient must still go out.
        let valid = Appointment::new(
            test.appointment.patient_id.clone(),
            test.appointment.doctor_id.clone(),
            "2024-06-10",
            "14:00",
        );
        test.ctx.repos.appointments.insert(&valid).await.unwrap();

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 1);
    }

    #[actix_web::test]
    async fn disabled_preference_blocks_delivery() {
        let test = setup("2024-06-10", "14:00", "2024-06-09 13:45").await;
        let mut preferences = test
            .ctx
            .repos
            .preferences
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .unwrap();
        preferences.appointment_reminders = false;
        test.ctx.repos.preferences.save(&preferences).await.unwrap();

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 0);
    }

    #[actix_web::test]
    async fn unverified_binding_blocks_delivery() {
        let test = setup("2024-06-10", "14:00", "2024-06-09 13:45").await;
        let mut binding = test
            .ctx
            .repos
            .bindings
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .unwrap();
        binding.is_verified = false;
        test.ctx.repos.bindings.upsert(&binding).await.unwrap();

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 0);
    }

    #[actix_web::test]
    async fn cancelled_appointments_are_not_considered() {
        let test = setup("2024-06-10", "14:00", "2024-06-09 13:45").await;
        let mut cancelled = test.appointment.clone();
        cancelled.status = AppointmentStatus::Cancelled;
        cancelled.id = Default::default();
        test.ctx.repos.appointments.insert(&cancelled).await.unwrap();

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        // Only the original scheduled appointment fires.
        assert_eq!(res.reminders_sent, 1);
    }

    #[actix_web::test]
    async fn failed_send_is_not_logged_and_retries_next_pass() {
        let mut test = setup("2024-06-10", "14:00", "2024-06-09 13:45").await;
        test.ctx.notifier = Arc::new(FailingNotificationSender);

        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 0);
        let logged = test
            .ctx
            .repos
            .reminder_log
            .find_kinds_for_day(&test.appointment.id, "2024-06-09")
            .await
            .unwrap();
        assert!(logged.is_empty());

        // Once the transport recovers the reminder goes out on the next pass.
        test.ctx.notifier = test.sender.clone();
        let res = execute(SendAppointmentRemindersUseCase::default(), &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.reminders_sent, 1);
    }
}
