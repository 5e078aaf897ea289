mod appointment;
mod binding;
mod conversation;
mod doctor;
mod medical_record;
mod medication;
mod patient;
mod preferences;
mod reminder_log;
mod shared;

use appointment::{IAppointmentRepo, InMemoryAppointmentRepo, PostgresAppointmentRepo};
use binding::{IChatBindingRepo, InMemoryChatBindingRepo, PostgresChatBindingRepo};
use conversation::{IConversationRepo, InMemoryConversationRepo, PostgresConversationRepo};
use doctor::{IDoctorRepo, InMemoryDoctorRepo, PostgresDoctorRepo};
use medical_record::{IMedicalRecordRepo, InMemoryMedicalRecordRepo, PostgresMedicalRecordRepo};
use medication::{
    IMedicationScheduleRepo, InMemoryMedicationScheduleRepo, PostgresMedicationScheduleRepo,
};
use patient::{IPatientRepo, InMemoryPatientRepo, PostgresPatientRepo};
use preferences::{
    INotificationPreferencesRepo, InMemoryNotificationPreferencesRepo,
    PostgresNotificationPreferencesRepo,
};
use reminder_log::{IReminderLogRepo, InMemoryReminderLogRepo, PostgresReminderLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub bindings: Arc<dyn IChatBindingRepo>,
    pub conversations: Arc<dyn IConversationRepo>,
    pub doctors: Arc<dyn IDoctorRepo>,
    pub medical_records: Arc<dyn IMedicalRecordRepo>,
    pub medications: Arc<dyn IMedicationScheduleRepo>,
    pub patients: Arc<dyn IPatientRepo>,
    pub preferences: Arc<dyn INotificationPreferencesRepo>,
    pub reminder_log: Arc<dyn IReminderLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            appointments: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            bindings: Arc::new(PostgresChatBindingRepo::new(pool.clone())),
            conversations: Arc::new(PostgresConversationRepo::new(pool.clone())),
            doctors: Arc::new(PostgresDoctorRepo::new(pool.clone())),
            medical_records: Arc::new(PostgresMedicalRecordRepo::new(pool.clone())),
            medications: Arc::new(PostgresMedicationScheduleRepo::new(pool.clone())),
            patients: Arc::new(PostgresPatientRepo::new(pool.clone())),
            preferences: Arc::new(PostgresNotificationPreferencesRepo::new(pool.clone())),
            reminder_log: Arc::new(PostgresReminderLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            bindings: Arc::new(InMemoryChatBindingRepo::new()),
            conversations: Arc::new(InMemoryConversationRepo::new()),
            doctors: Arc::new(InMemoryDoctorRepo::new()),
            medical_records: Arc::new(InMemoryMedicalRecordRepo::new()),
            medications: Arc::new(InMemoryMedicationScheduleRepo::new()),
            patients: Arc::new(InMemoryPatientRepo::new()),
            preferences: Arc::new(InMemoryNotificationPreferencesRepo::new()),
            reminder_log: Arc::new(InMemoryReminderLogRepo::new()),
        }
    }
}
