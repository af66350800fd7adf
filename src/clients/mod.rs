//! HTTP implementations of the collaborator ports.
//!
//! All three share one `reqwest::Client` configuration: basic auth with the
//! service API key, JSON accept header and a request timeout. Reads map a 404
//! to `Ok(None)`; any other failure is `BadGateway`. The notifier reports
//! failures as `ServiceUnavailable`.

use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::PscConfig;
use crate::error::PscError;
use crate::ports::Result;

mod exemptions;
mod metrics;
mod notifier;

pub use exemptions::HttpExemptionsClient;
pub use metrics::HttpMetricsClient;
pub use notifier::HttpChangeNotifier;

/// Connection details shared by the collaborator clients.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: Url, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorised(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorised(self.http.post(self.url(path)))
    }

    /// GET a JSON document; 404 is `Ok(None)`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.get(path).send().await.map_err(|e| {
            PscError::BadGateway(format!("request to {} failed: {e}", self.url(path)))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PscError::BadGateway(format!(
                "{} returned {status}",
                self.url(path)
            )));
        }

        response.json().await.map(Some).map_err(|e| {
            PscError::BadGateway(format!("invalid response from {}: {e}", self.url(path)))
        })
    }

    fn authorised(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header("Accept", "application/json")
    }
}

/// Build all three collaborator clients from process configuration.
pub fn from_config(
    config: &PscConfig,
) -> anyhow::Result<(HttpMetricsClient, HttpExemptionsClient, HttpChangeNotifier)> {
    let client = |url: &Url| ApiClient::new(url.clone(), config.api_key.clone(), config.http_timeout);
    Ok((
        HttpMetricsClient::new(client(&config.metrics_api_url)?),
        HttpExemptionsClient::new(client(&config.exemptions_api_url)?),
        HttpChangeNotifier::new(client(&config.change_notifier_url)?),
    ))
}
