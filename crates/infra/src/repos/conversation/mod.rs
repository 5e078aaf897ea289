mod inmemory;
mod postgres;

pub use inmemory::InMemoryConversationRepo;
use mediconnect_domain::ConversationState;
pub use postgres::PostgresConversationRepo;

#[async_trait::async_trait]
pub trait IConversationRepo: Send + Sync {
    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<ConversationState>>;
    /// Insert or replace the recipient's conversation state.
    async fn save(&self, recipient_id: i64, state: &ConversationState) -> anyhow::Result<()>;
    /// Clear the recipient back to idle.
    async fn delete(&self, recipient_id: i64) -> anyhow::Result<()>;
}
