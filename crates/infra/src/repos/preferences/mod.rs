mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationPreferencesRepo;
use mediconnect_domain::NotificationPreferences;
pub use postgres::PostgresNotificationPreferencesRepo;

#[async_trait::async_trait]
pub trait INotificationPreferencesRepo: Send + Sync {
    /// Create the all-enabled default row for a recipient unless one exists.
    async fn insert_defaults(&self, recipient_id: i64) -> anyhow::Result<()>;
    async fn save(&self, preferences: &NotificationPreferences) -> anyhow::Result<()>;
    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<NotificationPreferences>>;
}
