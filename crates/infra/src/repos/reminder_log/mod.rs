mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderLogRepo;
use mediconnect_domain::{ReminderKind, ReminderLogEntry, ID};
pub use postgres::PostgresReminderLogRepo;

#[async_trait::async_trait]
pub trait IReminderLogRepo: Send + Sync {
    /// Append a delivery record. The store enforces at most one row per
    /// (appointment, kind, day) and the insert reports whether a row was
    /// actually written, so a concurrent duplicate is dropped silently.
    async fn insert(&self, entry: &ReminderLogEntry) -> anyhow::Result<bool>;
    /// Reminder kinds already delivered for the appointment on the given
    /// calendar day.
    async fn find_kinds_for_day(
        &self,
        appointment_id: &ID,
        day: &str,
    ) -> anyhow::Result<Vec<ReminderKind>>;
}
