use super::IReminderLogRepo;
use mediconnect_domain::{ReminderKind, ReminderLogEntry, ID};
use sqlx::{FromRow, PgPool};

pub struct PostgresReminderLogRepo {
    pool: PgPool,
}

impl PostgresReminderLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderKindRaw {
    reminder_kind: String,
}

#[async_trait::async_trait]
impl IReminderLogRepo for PostgresReminderLogRepo {
    async fn insert(&self, entry: &ReminderLogEntry) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO appointment_reminder_log
            (appointment_uid, patient_uid, reminder_kind, sent_on, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(entry.appointment_id.inner_ref())
        .bind(entry.patient_id.inner_ref())
        .bind(entry.kind.as_str())
        .bind(&entry.sent_on)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_kinds_for_day(
        &self,
        appointment_id: &ID,
        day: &str,
    ) -> anyhow::Result<Vec<ReminderKind>> {
        let kinds: Vec<ReminderKindRaw> = sqlx::query_as(
            r#"
            SELECT reminder_kind FROM appointment_reminder_log
            WHERE appointment_uid = $1 AND sent_on = $2
            "#,
        )
        .bind(appointment_id.inner_ref())
        .bind(day)
        .fetch_all(&self.pool)
        .await?;
        Ok(kinds
            .into_iter()
            .filter_map(|k| k.reminder_kind.parse().ok())
            .collect())
    }
}
