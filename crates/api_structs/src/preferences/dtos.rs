use mediconnect_domain::NotificationPreferences;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesDTO {
    pub recipient_id: i64,
    pub appointment_reminders: bool,
    pub prescription_alerts: bool,
    pub medication_reminders: bool,
    pub general_notifications: bool,
}

impl NotificationPreferencesDTO {
    pub fn new(preferences: &NotificationPreferences) -> Self {
        Self {
            recipient_id: preferences.recipient_id,
            appointment_reminders: preferences.appointment_reminders,
            prescription_alerts: preferences.prescription_alerts,
            medication_reminders: preferences.medication_reminders,
            general_notifications: preferences.general_notifications,
        }
    }
}
