//! psc_server: PSC data service.
//!
//! Configuration comes from the environment (and `.env`), see `PscConfig`.
//! With the `database` feature and `DATABASE_URL` set, records live in
//! Postgres; otherwise the in-memory store is used.

use std::sync::Arc;

use anyhow::Context;
use psc_data_api::api::build_router;
use psc_data_api::clients;
use psc_data_api::config::PscConfig;
use psc_data_api::ports::RecordStore;
use psc_data_api::services::PscService;
use psc_data_api::store::MemoryRecordStore;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,psc_data_api=debug".into()),
        )
        .init();

    let config = PscConfig::from_env().context("invalid configuration")?;

    let store = record_store(&config).await?;
    let (metrics, exemptions, notifier) = clients::from_config(&config)?;

    let service = PscService::new(
        store,
        Arc::new(metrics),
        Arc::new(exemptions),
        Arc::new(notifier),
    )
    .with_skip_change_notification(config.skip_change_notification);
    if config.skip_change_notification {
        tracing::warn!("change notifications are disabled");
    }

    let app = build_router(Arc::new(service));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("psc_server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(feature = "database")]
async fn record_store(config: &PscConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    use psc_data_api::database::{DatabaseConfig, PscDatabase};

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, using in-memory record store");
        return Ok(Arc::new(MemoryRecordStore::new()));
    };

    let db = PscDatabase::connect(&DatabaseConfig::new(database_url, config.database_pool_size))
        .await
        .context("failed to open record store database")?;
    Ok(Arc::new(db.record_store()))
}

#[cfg(not(feature = "database"))]
async fn record_store(config: &PscConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL is set but the database feature is disabled");
    }
    tracing::info!("using in-memory record store");
    Ok(Arc::new(MemoryRecordStore::new()))
}
