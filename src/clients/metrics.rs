use async_trait::async_trait;
use tracing::debug;

use super::ApiClient;
use crate::models::CompanyMetrics;
use crate::ports::{MetricsProvider, Result};

/// Company metrics API client.
pub struct HttpMetricsClient {
    api: ApiClient,
}

impl HttpMetricsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MetricsProvider for HttpMetricsClient {
    async fn get_metrics(&self, company_number: &str) -> Result<Option<CompanyMetrics>> {
        let metrics = self
            .api
            .get_optional(&format!("/company/{company_number}/metrics"))
            .await?;
        if metrics.is_none() {
            debug!(company_number, "no metrics found for company");
        }
        Ok(metrics)
    }
}
