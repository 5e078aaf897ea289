use super::IChatBindingRepo;
use mediconnect_domain::{ChatBinding, ID};
use std::sync::Mutex;

pub struct InMemoryChatBindingRepo {
    bindings: Mutex<Vec<ChatBinding>>,
}

impl InMemoryChatBindingRepo {
    pub fn new() -> Self {
        Self {
            bindings: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IChatBindingRepo for InMemoryChatBindingRepo {
    async fn upsert(&self, binding: &ChatBinding) -> anyhow::Result<()> {
        let mut bindings = self.bindings.lock().unwrap();
        bindings.retain(|b| b.recipient_id != binding.recipient_id);
        bindings.push(binding.clone());
        Ok(())
    }

    async fn find_by_recipient(&self, recipient_id: i64) -> anyhow::Result<Option<ChatBinding>> {
        let bindings = self.bindings.lock().unwrap();
        Ok(bindings
            .iter()
            .find(|b| b.recipient_id == recipient_id)
            .cloned())
    }

    async fn find_verified_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Option<ChatBinding>> {
        let bindings = self.bindings.lock().unwrap();
        Ok(bindings
            .iter()
            .find(|b| &b.patient_id == patient_id && b.is_verified)
            .cloned())
    }
}
