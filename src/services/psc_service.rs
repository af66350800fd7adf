//! Facade over reconciliation, read-by-kind and listing.
//!
//! Holds the collaborator ports behind `Arc<dyn ...>` so the same service is
//! wired against Postgres and HTTP clients in the binary and against
//! in-memory doubles in tests.

use std::sync::Arc;
use tracing::debug;

use crate::error::PscError;
use crate::models::{DeletePscRequest, FullRecordPsc, PscKind, PscList, PscProjection};
use crate::ports::{ChangeNotifier, ExemptionsProvider, MetricsProvider, RecordStore, Result};
use crate::services::listing::{ListRequest, PscLister};
use crate::services::reconciliation::DeltaReconciler;
use crate::services::{transformer, visibility};

pub struct PscService {
    store: Arc<dyn RecordStore>,
    metrics: Arc<dyn MetricsProvider>,
    reconciler: DeltaReconciler,
    lister: PscLister,
}

impl PscService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        metrics: Arc<dyn MetricsProvider>,
        exemptions: Arc<dyn ExemptionsProvider>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            reconciler: DeltaReconciler::new(store.clone(), notifier),
            lister: PscLister::new(store.clone(), metrics.clone(), exemptions),
            store,
            metrics,
        }
    }

    pub fn with_skip_change_notification(mut self, skip: bool) -> Self {
        self.reconciler = self.reconciler.with_skip_change_notification(skip);
        self
    }

    pub async fn upsert(
        &self,
        company_number: &str,
        delta: FullRecordPsc,
        context_id: &str,
    ) -> Result<()> {
        self.reconciler
            .apply_upsert(company_number, delta, context_id)
            .await
    }

    pub async fn delete(&self, request: &DeletePscRequest) -> Result<()> {
        self.reconciler.apply_delete(request).await
    }

    /// Read one record as `kind`. A record stored under another kind or
    /// company is `NotFound`, as is a record with no public data block.
    pub async fn get_psc(
        &self,
        company_number: &str,
        notification_id: &str,
        kind: PscKind,
        register_view: bool,
    ) -> Result<PscProjection> {
        let document = self
            .store
            .find_by_company_and_id(company_number, notification_id)
            .await?
            .filter(|doc| doc.matches(company_number, kind))
            .ok_or_else(|| {
                debug!(company_number, notification_id, kind = %kind, "no PSC of this kind");
                PscError::not_found(format!(
                    "no {kind} with id {notification_id} for company {company_number}"
                ))
            })?;

        let show_dob_day =
            visibility::may_show_dob_day(self.metrics.as_ref(), &document, register_view).await?;

        transformer::project(&document, kind, show_dob_day).ok_or_else(|| {
            PscError::not_found(format!("PSC {notification_id} has no public data"))
        })
    }

    pub async fn list(&self, company_number: &str, request: &ListRequest) -> Result<PscList> {
        self.lister.list(company_number, request).await
    }
}
