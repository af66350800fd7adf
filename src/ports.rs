//! Port traits for the service's collaborators.
//!
//! The reconciliation, visibility and listing logic operate exclusively
//! through these traits, so the same code runs against Postgres and the HTTP
//! collaborators in production and against in-memory doubles in tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{CompanyExemptions, CompanyMetrics, DeltaAt, PscDocument, PscKind};

pub use crate::error::Result;

/// Persistence for canonical PSC records, one per notification id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<PscDocument>>;

    async fn find_by_company_and_id(
        &self,
        company_number: &str,
        id: &str,
    ) -> Result<Option<PscDocument>>;

    /// Whether a record with this id and a delta token `>= delta_at` exists.
    async fn find_newer_or_equal(&self, id: &str, delta_at: &DeltaAt) -> Result<bool>;

    /// Insert or replace by id.
    async fn save(&self, document: &PscDocument) -> Result<()>;

    async fn delete(&self, document: &PscDocument) -> Result<()>;

    async fn list_page(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
    ) -> Result<Vec<PscDocument>>;

    /// Like [`RecordStore::list_page`], restricted to records that are not
    /// ceased or ceased strictly after `cutoff`.
    async fn list_page_since(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
        cutoff: NaiveDate,
    ) -> Result<Vec<PscDocument>>;
}

/// Aggregate counts and register status per company. `Ok(None)` means the
/// provider has no metrics for the company.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn get_metrics(&self, company_number: &str) -> Result<Option<CompanyMetrics>>;
}

/// Active PSC exemptions per company. `Ok(None)` means none recorded.
#[async_trait]
pub trait ExemptionsProvider: Send + Sync {
    async fn get_exemptions(&self, company_number: &str) -> Result<Option<CompanyExemptions>>;
}

/// Identifies the resource a change notification is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceChange {
    pub company_number: String,
    pub notification_id: String,
    pub kind: PscKind,
    pub context_id: String,
}

impl ResourceChange {
    pub fn resource_uri(&self) -> String {
        self.kind
            .resource_uri(&self.company_number, &self.notification_id)
    }
}

/// Downstream "resource changed" / "resource deleted" events.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn notify_changed(&self, change: &ResourceChange) -> Result<()>;

    /// `deleted` is a best-effort snapshot of the deleted record's public projection.
    async fn notify_deleted(
        &self,
        change: &ResourceChange,
        deleted: Option<serde_json::Value>,
    ) -> Result<()>;
}
