use super::format::medication_alert_message;
use crate::shared::clock::local_now;
use crate::shared::usecase::UseCase;
use mediconnect_domain::ID;
use mediconnect_infra::MediconnectContext;
use std::collections::HashMap;
use tracing::error;

/// One scan pass over active medication schedules. An alert fires for every
/// schedule whose times list contains the current wall clock minute.
///
/// The job loop keeps this value alive between passes: `last_fired` holds
/// the minute each schedule last fired in, so a pass that repeats inside
/// one minute (or a pass delayed past its tick) cannot double-fire.
#[derive(Debug, Default)]
pub struct SendMedicationRemindersUseCase {
    last_fired: HashMap<ID, String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub alerts_sent: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendMedicationRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendMedicationReminders";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let now = local_now(ctx);
        let today = now.date();
        let current_time = now.format("%H:%M").to_string();
        let minute_key = now.format("%Y-%m-%d %H:%M").to_string();

        let schedules = ctx
            .repos
            .medications
            .find_active()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut alerts_sent = 0;
        for schedule in schedules {
            if !schedule.is_active_on(today) {
                continue;
            }
            if !schedule.times_for_day().iter().any(|t| t == &current_time) {
                continue;
            }
            if self.last_fired.get(&schedule.id) == Some(&minute_key) {
                continue;
            }

            let binding = match ctx
                .repos
                .bindings
                .find_verified_by_patient(&schedule.patient_id)
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
            if !preferences.medication_reminders {
                continue;
            }

            let patient = match ctx.repos.patients.find(&schedule.patient_id).await {
                Some(patient) => patient,
                None => continue,
            };

            let message = medication_alert_message(&patient, &schedule, &current_time);
            match ctx.notifier.send(binding.recipient_id, &message).await {
                Ok(()) => {
                    self.last_fired.insert(schedule.id.clone(), minute_key.clone());
                    alerts_sent += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to send medication reminder to {}: {:?}",
                        binding.recipient_id, e
                    );
                }
            }
        }

        // Entries from earlier minutes can never block again, drop them so
        // the map stays bounded by the live schedule set.
        self.last_fired.retain(|_, minute| minute == &minute_key);

        Ok(UseCaseRes { alerts_sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use mediconnect_domain::{ChatBinding, MedicationSchedule, Patient};
    use mediconnect_infra::{
        setup_inmemory_context, ISys, InMemoryNotificationSender, MediconnectContext,
    };
    use std::sync::Arc;

    const RECIPIENT: i64 = 2002;

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

    fn set_now(ctx: &mut MediconnectContext, date_time: &str) {
        ctx.sys = Arc::new(StaticTimeSys {
            millis: millis(date_time),
        });
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct TestContext {
        ctx: MediconnectContext,
        sender: Arc<InMemoryNotificationSender>,
        schedule: MedicationSchedule,
    }

    async fn setup(schedule: impl FnOnce(&mut MedicationSchedule)) -> TestContext {
        let mut ctx = setup_inmemory_context();
        ctx.config.clinic_timezone = chrono_tz::UTC;
        let sender = Arc::new(InMemoryNotificationSender::new());
        ctx.notifier = sender.clone();

        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        let mut med = MedicationSchedule::new(
            patient.id.clone(),
            "Ibuprofen",
            "1 tablet",
            "Daily",
            date("2024-06-01"),
        );
        schedule(&mut med);
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos.medications.insert(&med).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(RECIPIENT, &patient.email, patient.id.clone()))
            .await
            .unwrap();
        ctx.repos.preferences.insert_defaults(RECIPIENT).await.unwrap();

        TestContext {
            ctx,
            sender,
            schedule: med,
        }
    }

    #[actix_web::test]
    async fn fires_only_at_explicit_times() {
        let mut test = setup(|med| med.specific_times = Some("08:00, 20:00".into())).await;
        let mut usecase = SendMedicationRemindersUseCase::default();

        set_now(&mut test.ctx, "2024-06-10 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);

        set_now(&mut test.ctx, "2024-06-10 12:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);

        set_now(&mut test.ctx, "2024-06-10 20:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);

        let sent = test.sender.sent_messages();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].text.contains("08:00"));
        assert!(sent[1].text.contains("20:00"));
    }

    #[actix_web::test]
    async fn times_per_day_fires_at_the_default_times() {
        let mut test = setup(|med| med.times_per_day = Some(3)).await;
        let mut usecase = SendMedicationRemindersUseCase::default();

        for (now, expected) in &[
            ("2024-06-10 08:00", 1),
            ("2024-06-10 09:00", 0),
            ("2024-06-10 14:00", 1),
            ("2024-06-10 20:00", 1),
            ("2024-06-10 12:00", 0),
        ] {
            set_now(&mut test.ctx, now);
            assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, *expected);
        }
    }

    #[actix_web::test]
    async fn respects_the_start_end_window() {
        let mut test = setup(|med| {
            med.specific_times = Some("08:00".into());
            med.end_date = Some(date("2024-06-20"));
        })
        .await;
        let mut usecase = SendMedicationRemindersUseCase::default();

        set_now(&mut test.ctx, "2024-05-31 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);

        set_now(&mut test.ctx, "2024-06-20 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);

        set_now(&mut test.ctx, "2024-06-21 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);
    }

    #[actix_web::test]
    async fn a_repeated_pass_in_the_same_minute_fires_once() {
        let mut test = setup(|med| med.specific_times = Some("08:00".into())).await;
        let mut usecase = SendMedicationRemindersUseCase::default();

        set_now(&mut test.ctx, "2024-06-10 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);
        assert_eq!(test.sender.sent_messages().len(), 1);
    }

    #[actix_web::test]
    async fn the_same_minute_on_the_next_day_fires_again() {
        let mut test = setup(|med| med.specific_times = Some("08:00".into())).await;
        let mut usecase = SendMedicationRemindersUseCase::default();

        set_now(&mut test.ctx, "2024-06-10 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);
        set_now(&mut test.ctx, "2024-06-11 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 1);
    }

    #[actix_web::test]
    async fn disabled_preference_blocks_alerts() {
        let mut test = setup(|med| med.specific_times = Some("08:00".into())).await;
        let mut preferences = test
            .ctx
            .repos
            .preferences
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .unwrap();
        preferences.medication_reminders = false;
        test.ctx.repos.preferences.save(&preferences).await.unwrap();

        let mut usecase = SendMedicationRemindersUseCase::default();
        set_now(&mut test.ctx, "2024-06-10 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);
    }

    #[actix_web::test]
    async fn inactive_schedules_are_ignored() {
        let mut test = setup(|med| {
            med.specific_times = Some("08:00".into());
            med.is_active = false;
        })
        .await;

        let mut usecase = SendMedicationRemindersUseCase::default();
        set_now(&mut test.ctx, "2024-06-10 08:00");
        assert_eq!(usecase.execute(&test.ctx).await.unwrap().alerts_sent, 0);
        // Inactive rows are filtered by the repo query itself.
        assert!(test
            .ctx
            .repos
            .medications
            .find_active()
            .await
            .unwrap()
            .is_empty());
    }
}
