use super::IConversationRepo;
use mediconnect_domain::ConversationState;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryConversationRepo {
    conversations: Mutex<HashMap<i64, ConversationState>>,
}

impl InMemoryConversationRepo {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IConversationRepo for InMemoryConversationRepo {
    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<ConversationState>> {
        let conversations = self.conversations.lock().unwrap();
        Ok(conversations.get(&recipient_id).cloned())
    }

    async fn save(&self, recipient_id: i64, state: &ConversationState) -> anyhow::Result<()> {
        let mut conversations = self.conversations.lock().unwrap();
        conversations.insert(recipient_id, state.clone());
        Ok(())
    }

    async fn delete(&self, recipient_id: i64) -> anyhow::Result<()> {
        let mut conversations = self.conversations.lock().unwrap();
        conversations.remove(&recipient_id);
        Ok(())
    }
}
