mod sender;
mod telegram;

pub use sender::{INotificationSender, InMemoryNotificationSender, SentMessage};
pub use telegram::TelegramNotificationSender;
