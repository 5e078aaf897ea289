/// Per-recipient switches gating each notification type. Every switch is on
/// when a recipient is first verified.
#[derive(Debug, Clone)]
pub struct NotificationPreferences {
    pub recipient_id: i64,
    pub appointment_reminders: bool,
    pub prescription_alerts: bool,
    pub medication_reminders: bool,
    pub general_notifications: bool,
}

impl NotificationPreferences {
    pub fn new(recipient_id: i64) -> Self {
        Self {
            recipient_id,
            appointment_reminders: true,
            prescription_alerts: true,
            medication_reminders: true,
            general_notifications: true,
        }
    }
}
