use super::INotificationPreferencesRepo;
use mediconnect_domain::NotificationPreferences;
use sqlx::{FromRow, PgPool};

pub struct PostgresNotificationPreferencesRepo {
    pool: PgPool,
}

impl PostgresNotificationPreferencesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationPreferencesRaw {
    recipient_id: i64,
    appointment_reminders: bool,
    prescription_alerts: bool,
    medication_reminders: bool,
    general_notifications: bool,
}

impl From<NotificationPreferencesRaw> for NotificationPreferences {
    fn from(raw: NotificationPreferencesRaw) -> Self {
        Self {
            recipient_id: raw.recipient_id,
            appointment_reminders: raw.appointment_reminders,
            prescription_alerts: raw.prescription_alerts,
            medication_reminders: raw.medication_reminders,
            general_notifications: raw.general_notifications,
        }
    }
}

#[async_trait::async_trait]
impl INotificationPreferencesRepo for PostgresNotificationPreferencesRepo {
    async fn insert_defaults(&self, recipient_id: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences
            (recipient_id, appointment_reminders, prescription_alerts, medication_reminders, general_notifications)
            VALUES ($1, TRUE, TRUE, TRUE, TRUE)
            ON CONFLICT (recipient_id) DO NOTHING
            "#,
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, preferences: &NotificationPreferences) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notification_preferences SET
                appointment_reminders = $2,
                prescription_alerts = $3,
                medication_reminders = $4,
                general_notifications = $5
            WHERE recipient_id = $1
            "#,
        )
        .bind(preferences.recipient_id)
        .bind(preferences.appointment_reminders)
        .bind(preferences.prescription_alerts)
        .bind(preferences.medication_reminders)
        .bind(preferences.general_notifications)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<NotificationPreferences>> {
        let preferences: Option<NotificationPreferencesRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notification_preferences
            WHERE recipient_id = $1
            "#,
        )
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(preferences.map(|p| p.into()))
    }
}
