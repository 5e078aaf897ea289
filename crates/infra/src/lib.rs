mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use services::{
    INotificationSender, InMemoryNotificationSender, SentMessage, TelegramNotificationSender,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct MediconnectContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotificationSender>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl MediconnectContext {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let notifier: Arc<dyn INotificationSender> = match &config.telegram_bot_token {
            Some(token) => Arc::new(TelegramNotificationSender::new(token.clone())),
            None => {
                info!("Did not find TELEGRAM_BOT_TOKEN environment variable. Outbound notifications will only be recorded in memory.");
                Arc::new(InMemoryNotificationSender::new())
            }
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> MediconnectContext {
    MediconnectContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context wired against the in memory repos and the recording notification
/// sender. Used by tests.
pub fn setup_inmemory_context() -> MediconnectContext {
    MediconnectContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        notifier: Arc::new(InMemoryNotificationSender::new()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
