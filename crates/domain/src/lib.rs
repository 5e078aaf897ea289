mod appointment;
mod binding;
mod conversation;
pub mod date;
mod doctor;
mod medical_record;
mod medication;
mod patient;
mod preferences;
mod reminder;
mod shared;

pub use appointment::{Appointment, AppointmentStatus};
pub use binding::ChatBinding;
pub use conversation::{ConversationState, MedicationDraft};
pub use doctor::Doctor;
pub use medical_record::MedicalRecord;
pub use medication::MedicationSchedule;
pub use patient::Patient;
pub use preferences::NotificationPreferences;
pub use reminder::{ReminderKind, ReminderLogEntry};
pub use shared::entity::{Entity, ID};
