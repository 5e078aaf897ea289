mod format;
pub mod send_appointment_reminders;
pub mod send_medication_reminders;
pub mod send_prescription_alerts;
