use super::sender::INotificationSender;
use anyhow::bail;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// https://core.telegram.org/bots/api#making-requests
const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Client for the Telegram Bot HTTP API, the transport behind patient
/// notifications.
pub struct TelegramNotificationSender {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotificationSender {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, TELEGRAM_API_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

#[async_trait::async_trait]
impl INotificationSender for TelegramNotificationSender {
    async fn send(&self, recipient_id: i64, text: &str) -> anyhow::Result<()> {
        let res: BotApiResponse = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest {
                chat_id: recipient_id,
                text,
                parse_mode: "Markdown",
            })
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            bail!(
                "Chat transport rejected message for recipient {}: {:?}",
                recipient_id,
                res.description
            );
        }
        Ok(())
    }

    async fn send_document(
        &self,
        recipient_id: i64,
        document: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> anyhow::Result<()> {
        let form = Form::new()
            .text("chat_id", recipient_id.to_string())
            .text("caption", caption.to_string())
            .part("document", Part::bytes(document).file_name(filename.to_string()));
        let res: BotApiResponse = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            bail!(
                "Chat transport rejected document for recipient {}: {:?}",
                recipient_id,
                res.description
            );
        }
        Ok(())
    }
}
