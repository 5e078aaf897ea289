use chrono_tz::Tz;
use mediconnect_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Kiev;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// IANA timezone the clinic operates in. Reminder time windows, the
    /// medication wall clock and the per-day dedup keys are all evaluated
    /// in this zone.
    pub clinic_timezone: Tz,
    /// Token for the chat transport bot API. When it is absent outbound
    /// notifications are recorded in memory instead of being delivered.
    pub telegram_bot_token: Option<String>,
    /// Shared secret that chat webhook requests must carry.
    pub chat_webhook_secret: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let clinic_timezone = match std::env::var("CLINIC_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given CLINIC_TIMEZONE: {} is not a valid IANA timezone, falling back to {}.",
                        tz, DEFAULT_TIMEZONE
                    );
                    DEFAULT_TIMEZONE
                }
            },
            Err(_) => DEFAULT_TIMEZONE,
        };
        let chat_webhook_secret = match std::env::var("CHAT_WEBHOOK_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find CHAT_WEBHOOK_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!(
                    "Secret for the chat webhook was generated and set to: {}",
                    secret
                );
                secret
            }
        };
        Self {
            port,
            clinic_timezone,
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            chat_webhook_secret,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
