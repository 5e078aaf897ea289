use super::IReminderLogRepo;
use mediconnect_domain::{ReminderKind, ReminderLogEntry, ID};
use std::sync::Mutex;

pub struct InMemoryReminderLogRepo {
    entries: Mutex<Vec<ReminderLogEntry>>,
}

impl InMemoryReminderLogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderLogRepo for InMemoryReminderLogRepo {
    async fn insert(&self, entry: &ReminderLogEntry) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        let duplicate = entries.iter().any(|e| {
            e.appointment_id == entry.appointment_id
                && e.kind == entry.kind
                && e.sent_on == entry.sent_on
        });
        if duplicate {
            return Ok(false);
        }
        entries.push(entry.clone());
        Ok(true)
    }

    async fn find_kinds_for_day(
        &self,
        appointment_id: &ID,
        day: &str,
    ) -> anyhow::Result<Vec<ReminderKind>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|e| &e.appointment_id == appointment_id && e.sent_on == day)
            .map(|e| e.kind)
            .collect())
    }
}
