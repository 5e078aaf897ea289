use super::INotificationPreferencesRepo;
use mediconnect_domain::NotificationPreferences;
use std::sync::Mutex;

pub struct InMemoryNotificationPreferencesRepo {
    preferences: Mutex<Vec<NotificationPreferences>>,
}

impl InMemoryNotificationPreferencesRepo {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationPreferencesRepo for InMemoryNotificationPreferencesRepo {
    async fn insert_defaults(&self, recipient_id: i64) -> anyhow::Result<()> {
        let mut preferences = self.preferences.lock().unwrap();
        if !preferences.iter().any(|p| p.recipient_id == recipient_id) {
            preferences.push(NotificationPreferences::new(recipient_id));
        }
        Ok(())
    }

    async fn save(&self, updated: &NotificationPreferences) -> anyhow::Result<()> {
        let mut preferences = self.preferences.lock().unwrap();
        for p in preferences.iter_mut() {
            if p.recipient_id == updated.recipient_id {
                *p = updated.clone();
            }
        }
        Ok(())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<NotificationPreferences>> {
        let preferences = self.preferences.lock().unwrap();
        Ok(preferences
            .iter()
            .find(|p| p.recipient_id == recipient_id)
            .cloned())
    }
}
