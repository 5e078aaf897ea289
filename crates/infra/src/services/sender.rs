use std::sync::Mutex;

/// Outbound chat transport for patient notifications. Calls are
/// fire-and-forget from the scanners' point of view: a failed send is
/// reported to the caller, which logs it and moves on to the next
/// recipient.
#[async_trait::async_trait]
pub trait INotificationSender: Send + Sync {
    /// Deliver a markdown formatted text message.
    async fn send(&self, recipient_id: i64, text: &str) -> anyhow::Result<()>;

    /// Deliver a file attachment with a caption.
    async fn send_document(
        &self,
        recipient_id: i64,
        document: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> anyhow::Result<()>;
}

/// Message recorded by the `InMemoryNotificationSender`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub recipient_id: i64,
    pub text: String,
    /// Set when the message carried a document attachment
    pub document_filename: Option<String>,
}

/// Sender that only records messages. Backs the tests and deployments
/// without a transport token.
pub struct InMemoryNotificationSender {
    sent: Mutex<Vec<SentMessage>>,
}

impl InMemoryNotificationSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationSender for InMemoryNotificationSender {
    async fn send(&self, recipient_id: i64, text: &str) -> anyhow::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            recipient_id,
            text: text.to_string(),
            document_filename: None,
        });
        Ok(())
    }

    async fn send_document(
        &self,
        recipient_id: i64,
        _document: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> anyhow::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            recipient_id,
            text: caption.to_string(),
            document_filename: Some(filename.to_string()),
        });
        Ok(())
    }
}
