//! Process configuration read from the environment.

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_METRICS_API_URL: &str = "http://localhost:8082";
const DEFAULT_EXEMPTIONS_API_URL: &str = "http://localhost:8083";
const DEFAULT_CHANGE_NOTIFIER_URL: &str = "http://localhost:8084";

#[derive(Debug, Clone)]
pub struct PscConfig {
    pub bind_addr: SocketAddr,
    /// Postgres URL. Unset means the in-memory store.
    pub database_url: Option<String>,
    pub database_pool_size: u32,
    pub metrics_api_url: Url,
    pub exemptions_api_url: Url,
    pub change_notifier_url: Url,
    pub api_key: String,
    pub skip_change_notification: bool,
    pub http_timeout: Duration,
}

impl PscConfig {
    /// Read configuration from the process environment. Call
    /// `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("PSC_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("PSC_BIND_ADDR is not a socket address")?;

        let database_pool_size = match var("DATABASE_POOL_SIZE") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DATABASE_POOL_SIZE is not a number: {v}"))?,
            None => 10,
        };

        let http_timeout = match var("PSC_HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("PSC_HTTP_TIMEOUT_SECS is not a number: {v}"))?,
            ),
            None => Duration::from_secs(30),
        };

        let skip_change_notification = match var("PSC_SKIP_CHANGE_NOTIFICATION") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| anyhow!("PSC_SKIP_CHANGE_NOTIFICATION is not a boolean: {v}"))?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            database_pool_size,
            metrics_api_url: base_url(&var, "METRICS_API_URL", DEFAULT_METRICS_API_URL)?,
            exemptions_api_url: base_url(&var, "EXEMPTIONS_API_URL", DEFAULT_EXEMPTIONS_API_URL)?,
            change_notifier_url: base_url(
                &var,
                "CHANGE_NOTIFIER_URL",
                DEFAULT_CHANGE_NOTIFIER_URL,
            )?,
            api_key: var("PSC_API_KEY").unwrap_or_default(),
            skip_change_notification,
            http_timeout,
        })
    }
}

fn base_url(var: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<Url> {
    let raw = var(key).unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw).with_context(|| format!("{key} is not a valid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("{key} must be an http(s) URL: {raw}"));
    }
    Ok(url)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
