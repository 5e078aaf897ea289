use serde::{Deserialize, Serialize};

/// Incoming chat transport update, in the shape the Telegram Bot API posts
/// to a webhook. Fields the service does not use are simply not declared.
pub mod webhook {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct ChatRef {
        pub id: i64,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct ChatMessage {
        pub chat: ChatRef,
        #[serde(default)]
        pub text: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub message: Option<ChatMessage>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub ok: bool,
    }
}
