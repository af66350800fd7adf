use async_trait::async_trait;
use tracing::debug;

use super::ApiClient;
use crate::models::CompanyExemptions;
use crate::ports::{ExemptionsProvider, Result};

/// Company exemptions API client.
pub struct HttpExemptionsClient {
    api: ApiClient,
}

impl HttpExemptionsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ExemptionsProvider for HttpExemptionsClient {
    async fn get_exemptions(&self, company_number: &str) -> Result<Option<CompanyExemptions>> {
        let exemptions = self
            .api
            .get_optional(&format!("/company/{company_number}/exemptions"))
            .await?;
        if exemptions.is_none() {
            debug!(company_number, "no exemptions found for company");
        }
        Ok(exemptions)
    }
}
