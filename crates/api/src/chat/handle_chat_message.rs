use crate::error::MediconnectError;
use crate::pdf::{render_prescription, transliterate};
use crate::shared::clock::{local_datetime, local_now};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use itertools::Itertools;
use mediconnect_api_structs::webhook;
use mediconnect_domain::{
    date::is_valid_date, ChatBinding, ConversationState, MedicationDraft, MedicationSchedule,
};
use mediconnect_infra::MediconnectContext;
use tracing::error;

/// Header the chat transport echoes back on webhook calls.
const WEBHOOK_SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

const HELP_TEXT: &str = "Available commands:\n\
    /appointments - upcoming appointments\n\
    /prescriptions - recent prescriptions\n\
    /medications - your medication schedules\n\
    /addmedication - add a medication schedule\n\
    /download <id> - prescription PDF\n\
    /cancel - abort the current flow\n\
    /help - this message";

const VERIFY_FIRST: &str = "Please verify your account first. Send /start to begin.";

pub async fn chat_webhook_controller(
    http_req: HttpRequest,
    body: web::Json<webhook::RequestBody>,
    ctx: web::Data<MediconnectContext>,
) -> Result<HttpResponse, MediconnectError> {
    let secret = http_req
        .headers()
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if secret != Some(ctx.config.chat_webhook_secret.as_str()) {
        return Err(MediconnectError::Unauthorized(
            "Invalid or missing chat webhook secret".into(),
        ));
    }

    let message = match body.0.message {
        Some(message) => message,
        None => return Ok(HttpResponse::Ok().json(webhook::APIResponse { ok: true })),
    };
    let text = match message.text {
        Some(text) => text,
        None => return Ok(HttpResponse::Ok().json(webhook::APIResponse { ok: true })),
    };

    let usecase = HandleChatMessageUseCase {
        recipient_id: message.chat.id,
        text,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(webhook::APIResponse { ok: true }))
        .map_err(MediconnectError::from)
}

/// Dispatches one incoming chat message: either a step of the stored
/// conversation flow or a top level command.
#[derive(Debug)]
pub struct HandleChatMessageUseCase {
    pub recipient_id: i64,
    pub text: String,
}

#[derive(Debug)]
pub struct UseCaseRes;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    InvalidTransition,
}

impl From<UseCaseError> for MediconnectError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::InvalidTransition => {
                Self::Conflict("The conversation is in an unexpected state".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for HandleChatMessageUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "HandleChatMessage";

    async fn execute(&mut self, ctx: &MediconnectContext) -> Result<Self::Response, Self::Error> {
        let recipient_id = self.recipient_id;
        let text = self.text.trim().to_string();

        if text == "/cancel" {
            ctx.repos
                .conversations
                .delete(recipient_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            reply(ctx, recipient_id, "Cancelled. Send /help for the list of commands.").await;
            return Ok(UseCaseRes);
        }

        let state = ctx
            .repos
            .conversations
            .find_by_recipient(recipient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match state {
            Some(ConversationState::AwaitingEmail) => {
                handle_email_input(ctx, recipient_id, &text).await
            }
            Some(state) => handle_medication_step(ctx, recipient_id, state, &text).await,
            None => handle_command(ctx, recipient_id, &text).await,
        }
    }
}

async fn reply(ctx: &MediconnectContext, recipient_id: i64, text: &str) {
    if let Err(e) = ctx.notifier.send(recipient_id, text).await {
        error!("Failed to send chat reply to {}: {:?}", recipient_id, e);
    }
}

async fn transition(
    ctx: &MediconnectContext,
    recipient_id: i64,
    from: Option<&ConversationState>,
    to: ConversationState,
) -> Result<(), UseCaseError> {
    if !ConversationState::can_transition(from, &to) {
        return Err(UseCaseError::InvalidTransition);
    }
    ctx.repos
        .conversations
        .save(recipient_id, &to)
        .await
        .map_err(|_| UseCaseError::StorageError)
}

async fn verified_binding(
    ctx: &MediconnectContext,
    recipient_id: i64,
) -> Result<Option<ChatBinding>, UseCaseError> {
    Ok(ctx
        .repos
        .bindings
        .find_by_recipient(recipient_id)
        .await
        .map_err(|_| UseCaseError::StorageError)?
        .filter(|b| b.is_verified))
}

async fn handle_command(
    ctx: &MediconnectContext,
    recipient_id: i64,
    text: &str,
) -> Result<UseCaseRes, UseCaseError> {
    let binding = verified_binding(ctx, recipient_id).await?;

    if text == "/start" {
        match binding {
            Some(binding) => {
                let name = ctx
                    .repos
                    .patients
                    .find(&binding.patient_id)
                    .await
                    .map(|p| p.full_name())
                    .unwrap_or_else(|| "patient".into());
                reply(
                    ctx,
                    recipient_id,
                    &format!("👋 Welcome back, {}!\n\n{}", name, HELP_TEXT),
                )
                .await;
            }
            None => {
                transition(ctx, recipient_id, None, ConversationState::AwaitingEmail).await?;
                reply(
                    ctx,
                    recipient_id,
                    "👋 Welcome to Mediconnect!\n\nTo get started, please enter the email you \
                     registered with on the clinic website:",
                )
                .await;
            }
        }
        return Ok(UseCaseRes);
    }

    if text == "/help" {
        reply(ctx, recipient_id, HELP_TEXT).await;
        return Ok(UseCaseRes);
    }

    let binding = match binding {
        Some(binding) => binding,
        None => {
            reply(ctx, recipient_id, VERIFY_FIRST).await;
            return Ok(UseCaseRes);
        }
    };

    if text == "/appointments" {
        list_appointments(ctx, recipient_id, &binding).await?;
    } else if text == "/prescriptions" {
        list_prescriptions(ctx, recipient_id, &binding).await?;
    } else if text == "/medications" {
        list_medications(ctx, recipient_id, &binding).await?;
    } else if text == "/addmedication" {
        transition(
            ctx,
            recipient_id,
            None,
            ConversationState::AwaitingMedicationName(MedicationDraft::default()),
        )
        .await?;
        reply(
            ctx,
            recipient_id,
            "💊 Adding a medication schedule.\n\nEnter the medication name:",
        )
        .await;
    } else if let Some(record_id) = text.strip_prefix("/download ") {
        download_prescription(ctx, recipient_id, &binding, record_id.trim()).await?;
    } else {
        reply(
            ctx,
            recipient_id,
            "Unrecognized command. Send /help for the list of commands.",
        )
        .await;
    }

    Ok(UseCaseRes)
}

async fn handle_email_input(
    ctx: &MediconnectContext,
    recipient_id: i64,
    text: &str,
) -> Result<UseCaseRes, UseCaseError> {
    if !text.contains('@') || !text.contains('.') {
        reply(ctx, recipient_id, "❌ Please enter a valid email address:").await;
        return Ok(UseCaseRes);
    }

    let patient = ctx
        .repos
        .patients
        .find_by_email(text)
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    let patient = match patient {
        Some(patient) => patient,
        None => {
            reply(
                ctx,
                recipient_id,
                "❌ Could not find an account for that email. Check that you entered the email \
                 you registered with on the clinic website and try again:",
            )
            .await;
            return Ok(UseCaseRes);
        }
    };

    ctx.repos
        .bindings
        .upsert(&ChatBinding::verified(
            recipient_id,
            &patient.email,
            patient.id.clone(),
        ))
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    ctx.repos
        .preferences
        .insert_defaults(recipient_id)
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    ctx.repos
        .conversations
        .delete(recipient_id)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    reply(
        ctx,
        recipient_id,
        &format!(
            "✅ Your account is verified, {}!\n\nYou will now receive appointment reminders, \
             prescription alerts and medication reminders.\n\n{}",
            patient.full_name(),
            HELP_TEXT
        ),
    )
    .await;
    Ok(UseCaseRes)
}

async fn handle_medication_step(
    ctx: &MediconnectContext,
    recipient_id: i64,
    state: ConversationState,
    text: &str,
) -> Result<UseCaseRes, UseCaseError> {
    use ConversationState::*;

    match state {
        AwaitingMedicationName(mut draft) => {
            draft.medication_name = Some(text.to_string());
            transition(
                ctx,
                recipient_id,
                Some(&AwaitingMedicationName(draft.clone())),
                AwaitingMedicationDosage(draft),
            )
            .await?;
            reply(ctx, recipient_id, "Enter the dosage (for example: 1 tablet, 10ml):").await;
        }
        AwaitingMedicationDosage(mut draft) => {
            draft.dosage = Some(text.to_string());
            transition(
                ctx,
                recipient_id,
                Some(&AwaitingMedicationDosage(draft.clone())),
                AwaitingMedicationFrequency(draft),
            )
            .await?;
            reply(
                ctx,
                recipient_id,
                "How often should it be taken? (for example: Daily, Every other day, Weekly)",
            )
            .await;
        }
        AwaitingMedicationFrequency(mut draft) => {
            draft.frequency = Some(text.to_string());
            transition(
                ctx,
                recipient_id,
                Some(&AwaitingMedicationFrequency(draft.clone())),
                AwaitingMedicationTimesPerDay(draft),
            )
            .await?;
            reply(ctx, recipient_id, "How many times per day? (enter a number)").await;
        }
        AwaitingMedicationTimesPerDay(mut draft) => {
            let times_per_day = match text.parse::<i64>() {
                Ok(times_per_day) if times_per_day > 0 => times_per_day,
                _ => {
                    reply(ctx, recipient_id, "❌ Please enter a valid number:").await;
                    return Ok(UseCaseRes);
                }
            };
            draft.times_per_day = Some(times_per_day);
            transition(
                ctx,
                recipient_id,
                Some(&AwaitingMedicationTimesPerDay(draft.clone())),
                AwaitingMedicationStartDate(draft),
            )
            .await?;
            reply(ctx, recipient_id, "Enter the start date (YYYY-MM-DD):").await;
        }
        AwaitingMedicationStartDate(mut draft) => {
            if is_valid_date(text).is_err() {
                reply(ctx, recipient_id, "❌ Please enter a valid date (YYYY-MM-DD):").await;
                return Ok(UseCaseRes);
            }
            draft.start_date = Some(text.to_string());
            transition(
                ctx,
                recipient_id,
                Some(&AwaitingMedicationStartDate(draft.clone())),
                AwaitingMedicationEndDate(draft),
            )
            .await?;
            reply(
                ctx,
                recipient_id,
                "Enter the end date (YYYY-MM-DD) or 'none' for an open ended schedule:",
            )
            .await;
        }
        AwaitingMedicationEndDate(mut draft) => {
            let end_date = if text.eq_ignore_ascii_case("none") {
                None
            } else {
                if is_valid_date(text).is_err() {
                    reply(
                        ctx,
                        recipient_id,
                        "❌ Please enter a valid date (YYYY-MM-DD) or 'none':",
                    )
                    .await;
                    return Ok(UseCaseRes);
                }
                Some(text.to_string())
            };
            draft.end_date = end_date;
            finish_medication_setup(ctx, recipient_id, draft).await?;
        }
        AwaitingEmail => return Err(UseCaseError::InvalidTransition),
    }

    Ok(UseCaseRes)
}

async fn finish_medication_setup(
    ctx: &MediconnectContext,
    recipient_id: i64,
    draft: MedicationDraft,
) -> Result<(), UseCaseError> {
    let binding = match verified_binding(ctx, recipient_id).await? {
        Some(binding) => binding,
        None => {
            ctx.repos
                .conversations
                .delete(recipient_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            reply(ctx, recipient_id, VERIFY_FIRST).await;
            return Ok(());
        }
    };

    let start_date = draft
        .start_date
        .as_deref()
        .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    let start_date = match start_date {
        Some(start_date) => start_date,
        None => {
            ctx.repos
                .conversations
                .delete(recipient_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            reply(
                ctx,
                recipient_id,
                "❌ Something went wrong, please start again with /addmedication.",
            )
            .await;
            return Ok(());
        }
    };

    let mut schedule = MedicationSchedule::new(
        binding.patient_id.clone(),
        draft.medication_name.as_deref().unwrap_or_default(),
        draft.dosage.as_deref().unwrap_or_default(),
        draft.frequency.as_deref().unwrap_or_default(),
        start_date,
    );
    schedule.times_per_day = draft.times_per_day;
    schedule.end_date = draft
        .end_date
        .as_deref()
        .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    ctx.repos
        .medications
        .insert(&schedule)
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    ctx.repos
        .conversations
        .delete(recipient_id)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    reply(
        ctx,
        recipient_id,
        "✅ Your medication schedule was added! You will receive reminders at the scheduled times.",
    )
    .await;
    Ok(())
}

async fn list_appointments(
    ctx: &MediconnectContext,
    recipient_id: i64,
    binding: &ChatBinding,
) -> Result<(), UseCaseError> {
    let today = local_now(ctx).date().format("%Y-%m-%d").to_string();
    let appointments = ctx
        .repos
        .appointments
        .find_upcoming_by_patient(&binding.patient_id, &today)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    if appointments.is_empty() {
        reply(ctx, recipient_id, "📭 You have no upcoming appointments.").await;
        return Ok(());
    }

    let mut text = String::from("📅 *Your upcoming appointments:*\n\n");
    for (i, appointment) in appointments.iter().enumerate() {
        let doctor = ctx.repos.doctors.find(&appointment.doctor_id).await;
        let (doctor_name, specialization) = match &doctor {
            Some(doctor) => (doctor.full_name(), doctor.specialization.clone()),
            None => ("Unknown".into(), String::new()),
        };
        text.push_str(&format!(
            "{}. Dr. {} ({})\n   {} at {}\n\n",
            i + 1,
            doctor_name,
            specialization,
            appointment.date,
            appointment.time_of_day(),
        ));
    }
    reply(ctx, recipient_id, &text).await;
    Ok(())
}

async fn list_prescriptions(
    ctx: &MediconnectContext,
    recipient_id: i64,
    binding: &ChatBinding,
) -> Result<(), UseCaseError> {
    let records = ctx
        .repos
        .medical_records
        .find_recent_by_patient(&binding.patient_id, 10)
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    let records: Vec<_> = records.into_iter().filter(|r| r.has_prescriptions()).collect();

    if records.is_empty() {
        reply(ctx, recipient_id, "💊 You have no recent prescriptions.").await;
        return Ok(());
    }

    let mut text = String::from("💊 *Your recent prescriptions:*\n\n");
    for record in &records {
        let record_date = local_datetime(ctx, record.created)
            .format("%Y-%m-%d")
            .to_string();
        let doctor_name = match ctx.repos.doctors.find(&record.doctor_id).await {
            Some(doctor) => doctor.full_name(),
            None => "Unknown".into(),
        };
        let prescriptions: String = record
            .prescriptions
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(100)
            .collect();
        text.push_str(&format!(
            "{} - Dr. {}\n   {}\n   Download: /download {}\n\n",
            record_date, doctor_name, prescriptions, record.id
        ));
    }
    reply(ctx, recipient_id, &text).await;
    Ok(())
}

async fn list_medications(
    ctx: &MediconnectContext,
    recipient_id: i64,
    binding: &ChatBinding,
) -> Result<(), UseCaseError> {
    let schedules = ctx
        .repos
        .medications
        .find_active_by_patient(&binding.patient_id)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    if schedules.is_empty() {
        reply(
            ctx,
            recipient_id,
            "⏰ You have no active medication schedules. Send /addmedication to create one.",
        )
        .await;
        return Ok(());
    }

    let mut text = String::from("⏰ *Your medication schedules:*\n\n");
    for (i, schedule) in schedules.iter().enumerate() {
        let times = schedule.times_for_day().iter().join(", ");
        text.push_str(&format!(
            "{}. {} ({})\n   Frequency: {}\n   Times: {}\n\n",
            i + 1,
            schedule.medication_name,
            schedule.dosage,
            schedule.frequency,
            if times.is_empty() { "-".into() } else { times },
        ));
    }
    reply(ctx, recipient_id, &text).await;
    Ok(())
}

async fn download_prescription(
    ctx: &MediconnectContext,
    recipient_id: i64,
    binding: &ChatBinding,
    record_id: &str,
) -> Result<(), UseCaseError> {
    let record_id = match record_id.parse::<mediconnect_domain::ID>() {
        Ok(record_id) => record_id,
        Err(_) => {
            reply(ctx, recipient_id, "❌ Could not find that prescription.").await;
            return Ok(());
        }
    };
    let record = ctx.repos.medical_records.find(&record_id).await;
    let record = match record {
        Some(record) if record.patient_id == binding.patient_id => record,
        _ => {
            reply(ctx, recipient_id, "❌ Could not find that prescription.").await;
            return Ok(());
        }
    };
    let patient = match ctx.repos.patients.find(&record.patient_id).await {
        Some(patient) => patient,
        None => {
            reply(ctx, recipient_id, "❌ Could not find that prescription.").await;
            return Ok(());
        }
    };
    let doctor = match ctx.repos.doctors.find(&record.doctor_id).await {
        Some(doctor) => doctor,
        None => {
            reply(ctx, recipient_id, "❌ Could not find that prescription.").await;
            return Ok(());
        }
    };

    let record_date = local_datetime(ctx, record.created);
    let generated_at = local_now(ctx);
    let document = match render_prescription(&record, &patient, &doctor, record_date, generated_at)
    {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to render prescription {}: {:?}", record.id, e);
            reply(ctx, recipient_id, "❌ Could not generate the PDF, try again later.").await;
            return Ok(());
        }
    };
    let filename = format!("prescription_{}.pdf", transliterate(&patient.last_name));
    if let Err(e) = ctx
        .notifier
        .send_document(recipient_id, document, &filename, "💊 Your prescription")
        .await
    {
        error!("Failed to send prescription document to {}: {:?}", recipient_id, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediconnect_domain::{Appointment, Doctor, MedicalRecord, Patient};
    use mediconnect_infra::{
        setup_inmemory_context, ISys, InMemoryNotificationSender, MediconnectContext,
    };
    use std::sync::Arc;

    const RECIPIENT: i64 = 7007;

    struct StaticTimeSys {
        millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.millis
        }
    }

    async fn send(ctx: &MediconnectContext, text: &str) {
        let usecase = HandleChatMessageUseCase {
            recipient_id: RECIPIENT,
            text: text.into(),
        };
        execute(usecase, ctx).await.unwrap();
    }

    fn setup() -> (MediconnectContext, Arc<InMemoryNotificationSender>) {
        let mut ctx = setup_inmemory_context();
        ctx.config.clinic_timezone = chrono_tz::UTC;
        let sender = Arc::new(InMemoryNotificationSender::new());
        ctx.notifier = sender.clone();
        (ctx, sender)
    }

    async fn setup_verified() -> (MediconnectContext, Arc<InMemoryNotificationSender>, Patient) {
        let (ctx, sender) = setup();
        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        ctx.repos.patients.insert(&patient).await.unwrap();
        ctx.repos
            .bindings
            .upsert(&ChatBinding::verified(RECIPIENT, &patient.email, patient.id.clone()))
            .await
            .unwrap();
        ctx.repos.preferences.insert_defaults(RECIPIENT).await.unwrap();
        (ctx, sender, patient)
    }

    #[actix_web::test]
    async fn start_walks_through_email_verification() {
        let (ctx, sender) = setup();
        let patient = Patient::new("Olena", "Shevchenko", "olena@example.com");
        ctx.repos.patients.insert(&patient).await.unwrap();

        send(&ctx, "/start").await;
        assert_eq!(
            ctx.repos
                .conversations
                .find_by_recipient(RECIPIENT)
                .await
                .unwrap(),
            Some(ConversationState::AwaitingEmail)
        );

        send(&ctx, "olena@example.com").await;
        let binding = ctx
            .repos
            .bindings
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .unwrap();
        assert!(binding.is_verified);
        assert_eq!(binding.patient_id, patient.id);
        assert!(ctx
            .repos
            .conversations
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .is_none());
        assert!(ctx
            .repos
            .preferences
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .is_some());

        let replies = sender.sent_messages();
        assert_eq!(replies.len(), 2);
        assert!(replies[1].text.contains("verified"));
    }

    #[actix_web::test]
    async fn bad_email_input_keeps_waiting() {
        let (ctx, sender) = setup();
        send(&ctx, "/start").await;
        send(&ctx, "not an email").await;
        send(&ctx, "ghost@example.com").await;

        assert_eq!(
            ctx.repos
                .conversations
                .find_by_recipient(RECIPIENT)
                .await
                .unwrap(),
            Some(ConversationState::AwaitingEmail)
        );
        assert!(ctx
            .repos
            .bindings
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .is_none());
        assert_eq!(sender.sent_messages().len(), 3);
    }

    #[actix_web::test]
    async fn medication_setup_flow_creates_a_schedule() {
        let (ctx, _sender, patient) = setup_verified().await;

        send(&ctx, "/addmedication").await;
        send(&ctx, "Ibuprofen").await;
        send(&ctx, "1 tablet").await;
        send(&ctx, "Daily").await;
        send(&ctx, "2").await;
        send(&ctx, "2024-06-01").await;
        send(&ctx, "none").await;

        let schedules = ctx
            .repos
            .medications
            .find_active_by_patient(&patient.id)
            .await
            .unwrap();
        assert_eq!(schedules.len(), 1);
        let schedule = &schedules[0];
        assert_eq!(schedule.medication_name, "Ibuprofen");
        assert_eq!(schedule.times_per_day, Some(2));
        assert_eq!(schedule.end_date, None);
        assert_eq!(
            schedule.times_for_day(),
            vec!["08:00".to_string(), "20:00".to_string()]
        );
        assert!(ctx
            .repos
            .conversations
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .is_none());
    }

    #[actix_web::test]
    async fn invalid_flow_input_reprompts_without_advancing() {
        let (ctx, _sender, patient) = setup_verified().await;

        send(&ctx, "/addmedication").await;
        send(&ctx, "Ibuprofen").await;
        send(&ctx, "1 tablet").await;
        send(&ctx, "Daily").await;
        send(&ctx, "twice").await;
        match ctx
            .repos
            .conversations
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
        {
            Some(ConversationState::AwaitingMedicationTimesPerDay(_)) => {}
            other => panic!("Unexpected state: {:?}", other),
        }

        send(&ctx, "2").await;
        send(&ctx, "01.06.2024").await;
        match ctx
            .repos
            .conversations
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
        {
            Some(ConversationState::AwaitingMedicationStartDate(_)) => {}
            other => panic!("Unexpected state: {:?}", other),
        }

        assert!(ctx
            .repos
            .medications
            .find_active_by_patient(&patient.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn cancel_clears_the_current_flow() {
        let (ctx, sender, _) = setup_verified().await;
        send(&ctx, "/addmedication").await;
        send(&ctx, "/cancel").await;

        assert!(ctx
            .repos
            .conversations
            .find_by_recipient(RECIPIENT)
            .await
            .unwrap()
            .is_none());
        let replies = sender.sent_messages();
        assert!(replies.last().unwrap().text.contains("Cancelled"));
    }

    #[actix_web::test]
    async fn commands_require_a_verified_binding() {
        let (ctx, sender) = setup();
        send(&ctx, "/appointments").await;
        let replies = sender.sent_messages();
        assert!(replies[0].text.contains("verify"));
    }

    #[actix_web::test]
    async fn lists_upcoming_appointments() {
        let (mut ctx, sender, patient) = setup_verified().await;
        ctx.sys = Arc::new(StaticTimeSys {
            millis: chrono::NaiveDateTime::parse_from_str("2024-06-09 10:00", "%Y-%m-%d %H:%M")
                .unwrap()
                .and_utc()
                .timestamp_millis(),
        });
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        let appointment =
            Appointment::new(patient.id.clone(), doctor.id.clone(), "2024-06-10", "14:00");
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        send(&ctx, "/appointments").await;
        let replies = sender.sent_messages();
        let text = &replies.last().unwrap().text;
        assert!(text.contains("Iryna Kovalenko"));
        assert!(text.contains("2024-06-10 at 14:00"));
    }

    #[actix_web::test]
    async fn download_sends_the_prescription_document() {
        let (ctx, sender, patient) = setup_verified().await;
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        let mut record = MedicalRecord::new(patient.id.clone(), doctor.id.clone(), 0);
        record.prescriptions = Some("Ibuprofen 200mg".into());
        ctx.repos.medical_records.insert(&record).await.unwrap();

        send(&ctx, &format!("/download {}", record.id)).await;
        let replies = sender.sent_messages();
        let last = replies.last().unwrap();
        assert_eq!(
            last.document_filename.as_deref(),
            Some("prescription_Shevchenko.pdf")
        );
    }

    #[actix_web::test]
    async fn foreign_records_cannot_be_downloaded() {
        let (ctx, sender, _patient) = setup_verified().await;
        let other = Patient::new("Petro", "Bondarenko", "petro@example.com");
        let doctor = Doctor::new("Iryna", "Kovalenko", "Cardiology");
        ctx.repos.patients.insert(&other).await.unwrap();
        ctx.repos.doctors.insert(&doctor).await.unwrap();
        let mut record = MedicalRecord::new(other.id.clone(), doctor.id.clone(), 0);
        record.prescriptions = Some("Ibuprofen 200mg".into());
        ctx.repos.medical_records.insert(&record).await.unwrap();

        send(&ctx, &format!("/download {}", record.id)).await;
        let replies = sender.sent_messages();
        let last = replies.last().unwrap();
        assert!(last.document_filename.is_none());
        assert!(last.text.contains("Could not find"));
    }
}
