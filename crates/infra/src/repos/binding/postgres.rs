use super::IChatBindingRepo;
use mediconnect_domain::{ChatBinding, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresChatBindingRepo {
    pool: PgPool,
}

impl PostgresChatBindingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ChatBindingRaw {
    recipient_id: i64,
    email: String,
    patient_uid: Uuid,
    is_verified: bool,
}

impl From<ChatBindingRaw> for ChatBinding {
    fn from(raw: ChatBindingRaw) -> Self {
        Self {
            recipient_id: raw.recipient_id,
            email: raw.email,
            patient_id: raw.patient_uid.into(),
            is_verified: raw.is_verified,
        }
    }
}

#[async_trait::async_trait]
impl IChatBindingRepo for PostgresChatBindingRepo {
    async fn upsert(&self, binding: &ChatBinding) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_bindings
            (recipient_id, email, patient_uid, is_verified)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (recipient_id) DO UPDATE SET
                email = $2,
                patient_uid = $3,
                is_verified = $4
            "#,
        )
        .bind(binding.recipient_id)
        .bind(&binding.email)
        .bind(binding.patient_id.inner_ref())
        .bind(binding.is_verified)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_recipient(&self, recipient_id: i64) -> anyhow::Result<Option<ChatBinding>> {
        let binding: Option<ChatBindingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM chat_bindings
            WHERE recipient_id = $1
            "#,
        )
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(binding.map(|b| b.into()))
    }

    async fn find_verified_by_patient(
        &self,
        patient_id: &ID,
    ) -> anyhow::Result<Option<ChatBinding>> {
        let binding: Option<ChatBindingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM chat_bindings
            WHERE patient_uid = $1 AND is_verified = TRUE
            "#,
        )
        .bind(patient_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(binding.map(|b| b.into()))
    }
}
