use super::IConversationRepo;
use mediconnect_domain::ConversationState;
use sqlx::{types::Json, FromRow, PgPool};

pub struct PostgresConversationRepo {
    pool: PgPool,
}

impl PostgresConversationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ConversationRaw {
    state: serde_json::Value,
}

#[async_trait::async_trait]
impl IConversationRepo for PostgresConversationRepo {
    async fn find_by_recipient(
        &self,
        recipient_id: i64,
    ) -> anyhow::Result<Option<ConversationState>> {
        let conversation: Option<ConversationRaw> = sqlx::query_as(
            r#"
            SELECT state FROM conversations
            WHERE recipient_id = $1
            "#,
        )
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;
        match conversation {
            Some(raw) => Ok(Some(serde_json::from_value(raw.state)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, recipient_id: i64, state: &ConversationState) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO conversations (recipient_id, state)
            VALUES ($1, $2)
            ON CONFLICT (recipient_id) DO UPDATE SET state = $2
            "#,
        )
        .bind(recipient_id)
        .bind(Json(state))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, recipient_id: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM conversations
            WHERE recipient_id = $1
            "#,
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
