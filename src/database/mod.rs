//! Postgres connection management and the Postgres record store.

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

mod record_store;

pub use record_store::PgRecordStore;

/// Pool settings for the record store database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

/// Migrated connection pool backing [`PgRecordStore`].
pub struct PscDatabase {
    pool: PgPool,
}

impl PscDatabase {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let target = redact_password(&config.database_url);
        info!(database = %target, max_connections = config.max_connections, "connecting record store");

        let pool = config
            .pool_options()
            .connect(&config.database_url)
            .await
            .inspect_err(|e| warn!(database = %target, error = %e, "record store connection failed"))?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(database = %target, "record store schema up to date");
        Ok(Self { pool })
    }

    pub fn record_store(&self) -> PgRecordStore {
        PgRecordStore::new(self.pool.clone())
    }
}

/// Database URL safe for logs: any password becomes `redacted`.
fn redact_password(database_url: &str) -> String {
    let Ok(mut url) = url::Url::parse(database_url) else {
        return "<unparseable database url>".to_string();
    };
    if url.password().is_some() && url.set_password(Some("redacted")).is_err() {
        return "<unparseable database url>".to_string();
    }
    url.into()
}
