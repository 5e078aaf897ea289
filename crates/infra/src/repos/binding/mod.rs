mod inmemory;
mod postgres;

pub use inmemory::InMemoryChatBindingRepo;
use mediconnect_domain::{ChatBinding, ID};
pub use postgres::PostgresChatBindingRepo;

#[async_trait::async_trait]
pub trait IChatBindingRepo: Send + Sync {
    /// Insert or overwrite the binding for the recipient. Verification is
    /// idempotent, so re-binding simply replaces what was there.
    async fn upsert(&self, binding: &ChatBinding) -> anyhow::Result<()>;
    async fn find_by_recipient(&self, recipient_id: i64) -> anyhow::Result<Option<ChatBinding>>;
    async fn find_verified_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Option<ChatBinding>>;
}
