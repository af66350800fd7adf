//! Paginated PSC lists for a company.
//!
//! The standard list takes its counts from the metrics provider. The register
//! view counts ceased records locally from the page it returns and filters on
//! the date the register moved to the public register. The two paths disagree
//! on where `ceased_count` comes from; that is existing behaviour and is kept.

use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::PscError;
use crate::models::{PscList, PscListLinks};
use crate::ports::{ExemptionsProvider, MetricsProvider, RecordStore, Result};
use crate::services::transformer;

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 25;
pub const MAX_ITEMS_PER_PAGE: u32 = 100;

/// List query parameters. Absent values take their defaults; oversized pages
/// are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequest {
    pub start_index: Option<u32>,
    pub items_per_page: Option<u32>,
    #[serde(default)]
    pub register_view: bool,
}

impl ListRequest {
    pub fn start_index(&self) -> u32 {
        self.start_index.unwrap_or(0)
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
            .min(MAX_ITEMS_PER_PAGE)
    }
}

pub struct PscLister {
    store: Arc<dyn RecordStore>,
    metrics: Arc<dyn MetricsProvider>,
    exemptions: Arc<dyn ExemptionsProvider>,
}

impl PscLister {
    pub fn new(
        store: Arc<dyn RecordStore>,
        metrics: Arc<dyn MetricsProvider>,
        exemptions: Arc<dyn ExemptionsProvider>,
    ) -> Self {
        Self {
            store,
            metrics,
            exemptions,
        }
    }

    pub async fn list(&self, company_number: &str, request: &ListRequest) -> Result<PscList> {
        if request.register_view {
            self.list_register_view(company_number, request).await
        } else {
            self.list_standard(company_number, request).await
        }
    }

    pub async fn list_standard(
        &self,
        company_number: &str,
        request: &ListRequest,
    ) -> Result<PscList> {
        let start_index = request.start_index();
        let items_per_page = request.items_per_page();

        let documents = self
            .store
            .list_page(company_number, start_index, items_per_page)
            .await?;
        let items: Vec<_> = documents
            .iter()
            .map(|doc| transformer::to_list_summary(doc, false))
            .collect();

        let (active_count, ceased_count, total_results) = if items.is_empty() {
            (Some(0), Some(0), Some(0))
        } else {
            match self.metrics.get_metrics(company_number).await? {
                Some(metrics) => (
                    metrics.active_count(),
                    metrics.ceased_count(),
                    metrics.total_count(),
                ),
                None => {
                    debug!(company_number, "no metrics; list counts left unset");
                    (None, None, None)
                }
            }
        };

        let exemptions = match self.exemptions.get_exemptions(company_number).await? {
            Some(exemptions) if exemptions.has_active_exemption() => {
                Some(exemptions_link(company_number))
            }
            _ => None,
        };

        Ok(PscList {
            items,
            items_per_page,
            start_index,
            total_results,
            active_count,
            ceased_count,
            links: PscListLinks {
                self_link: list_link(company_number),
                exemptions,
            },
        })
    }

    pub async fn list_register_view(
        &self,
        company_number: &str,
        request: &ListRequest,
    ) -> Result<PscList> {
        let start_index = request.start_index();
        let items_per_page = request.items_per_page();

        let metrics = self
            .metrics
            .get_metrics(company_number)
            .await?
            .ok_or_else(|| PscError::not_found(format!("no company metrics for {company_number}")))?;
        if !metrics.is_on_public_register() {
            return Err(PscError::not_found(format!(
                "PSC register for {company_number} is not on the public register"
            )));
        }
        let cutoff = metrics.register_moved_on().ok_or_else(|| {
            PscError::not_found(format!("no register moved_on date for {company_number}"))
        })?;

        let documents = self
            .store
            .list_page_since(company_number, start_index, items_per_page, cutoff)
            .await?;
        let ceased_count = documents
            .iter()
            .filter(|doc| doc.ceased_on().is_some())
            .count() as i64;
        let items = documents
            .iter()
            .map(|doc| transformer::to_list_summary(doc, true))
            .collect();

        let active_count = metrics.active_count();
        Ok(PscList {
            items,
            items_per_page,
            start_index,
            total_results: Some(active_count.unwrap_or(0) + ceased_count),
            active_count,
            ceased_count: Some(ceased_count),
            links: PscListLinks {
                self_link: list_link(company_number),
                exemptions: None,
            },
        })
    }
}

fn list_link(company_number: &str) -> String {
    format!("/company/{company_number}/persons-with-significant-control")
}

fn exemptions_link(company_number: &str) -> String {
    format!("/company/{company_number}/exemptions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exemptions::{ExemptionCategory, ExemptionItem, Exemptions};
    use crate::models::metrics::{MetricsCounts, PscCounts, RegisterEntry, Registers};
    use crate::models::{
        CompanyExemptions, CompanyMetrics, Created, DateOfBirth, DeltaAt, PscData, PscDocument,
        PscKind, PscSensitiveData, Updated,
    };
    use crate::services::test_support::{StaticExemptions, StaticMetrics};
    use crate::store::MemoryRecordStore;
    use chrono::{NaiveDate, Utc};

    const COMPANY: &str = "00006400";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn document(id: &str, ceased_on: Option<NaiveDate>) -> PscDocument {
        PscDocument {
            id: id.into(),
            psc_id: None,
            company_number: COMPANY.into(),
            delta_at: DeltaAt::parse("20240101000000000000").unwrap(),
            kind: PscKind::Individual.as_str().into(),
            created: Created { at: Utc::now() },
            updated: Updated {
                at: Utc::now(),
                by: "test".into(),
            },
            data: Some(PscData {
                name: Some(format!("Person {id}")),
                ceased_on,
                ceased: Some(ceased_on.is_some()),
                ..Default::default()
            }),
            sensitive_data: Some(PscSensitiveData {
                date_of_birth: Some(DateOfBirth {
                    day: Some(12),
                    month: Some(3),
                    year: Some(1980),
                }),
                ..Default::default()
            }),
        }
    }

    fn metrics(register_type: Option<&str>, moved_on: Option<NaiveDate>) -> CompanyMetrics {
        CompanyMetrics {
            counts: Some(MetricsCounts {
                persons_with_significant_control: Some(PscCounts {
                    active_psc_count: Some(7),
                    ceased_psc_count: Some(3),
                    total_count: Some(10),
                }),
            }),
            registers: register_type.map(|register_type| Registers {
                persons_with_significant_control: Some(RegisterEntry {
                    register_type: Some(register_type.into()),
                    moved_on,
                }),
            }),
        }
    }

    fn exemptions(exempt_to: Option<NaiveDate>) -> CompanyExemptions {
        CompanyExemptions {
            exemptions: Some(Exemptions {
                psc_exempt_as_shares_admitted_on_market: Some(ExemptionCategory {
                    items: vec![ExemptionItem {
                        exempt_from: date(2019, 1, 1),
                        exempt_to,
                    }],
                }),
                ..Default::default()
            }),
        }
    }

    async fn store_with(documents: Vec<PscDocument>) -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        for doc in &documents {
            store.save(doc).await.unwrap();
        }
        store
    }

    fn lister(
        store: MemoryRecordStore,
        metrics: StaticMetrics,
        exemptions: StaticExemptions,
    ) -> PscLister {
        PscLister::new(Arc::new(store), Arc::new(metrics), Arc::new(exemptions))
    }

    #[test]
    fn page_parameters_default_and_clamp() {
        let defaults = ListRequest::default();
        assert_eq!(defaults.start_index(), 0);
        assert_eq!(defaults.items_per_page(), 25);

        let oversized = ListRequest {
            items_per_page: Some(500),
            ..Default::default()
        };
        assert_eq!(oversized.items_per_page(), 100);
    }

    #[tokio::test]
    async fn standard_list_uses_metrics_counts() {
        let store = store_with(vec![document("a", None), document("b", Some(date(2021, 1, 1)))]).await;
        let lister = lister(
            store,
            StaticMetrics::with(metrics(None, None)),
            StaticExemptions::empty(),
        );

        let list = lister
            .list_standard(COMPANY, &ListRequest::default())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items_per_page, 25);
        assert_eq!(list.active_count, Some(7));
        assert_eq!(list.ceased_count, Some(3));
        assert_eq!(list.total_results, Some(10));
        assert_eq!(
            list.links.self_link,
            "/company/00006400/persons-with-significant-control"
        );
        assert!(list.links.exemptions.is_none());
        assert!(list.items.iter().all(|i| i.date_of_birth.unwrap().day.is_none()));
    }

    #[tokio::test]
    async fn standard_list_without_metrics_leaves_counts_unset() {
        let store = store_with(vec![document("a", None)]).await;
        let lister = lister(store, StaticMetrics::empty(), StaticExemptions::empty());
        let list = lister
            .list_standard(COMPANY, &ListRequest::default())
            .await
            .unwrap();
        assert_eq!(list.active_count, None);
        assert_eq!(list.total_results, None);
    }

    #[tokio::test]
    async fn empty_page_reports_zero_counts_without_metrics_call() {
        let metrics = Arc::new(StaticMetrics::failing());
        let lister = PscLister::new(
            Arc::new(MemoryRecordStore::new()),
            metrics.clone(),
            Arc::new(StaticExemptions::empty()),
        );
        let list = lister
            .list_standard(COMPANY, &ListRequest::default())
            .await
            .unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.active_count, Some(0));
        assert_eq!(list.ceased_count, Some(0));
        assert_eq!(list.total_results, Some(0));
        assert_eq!(metrics.calls(), 0);
    }

    #[tokio::test]
    async fn exemptions_link_only_for_open_ended_exemption() {
        let store = store_with(vec![document("a", None)]).await;
        let active = lister(
            store.clone(),
            StaticMetrics::empty(),
            StaticExemptions::with(exemptions(None)),
        );
        let list = active
            .list_standard(COMPANY, &ListRequest::default())
            .await
            .unwrap();
        assert_eq!(
            list.links.exemptions.as_deref(),
            Some("/company/00006400/exemptions")
        );

        let expired = lister(
            store,
            StaticMetrics::empty(),
            StaticExemptions::with(exemptions(Some(date(2020, 1, 1)))),
        );
        let list = expired
            .list_standard(COMPANY, &ListRequest::default())
            .await
            .unwrap();
        assert!(list.links.exemptions.is_none());
    }

    #[tokio::test]
    async fn standard_list_paginates_in_id_order() {
        let docs = (0..5).map(|i| document(&format!("id{i}"), None)).collect();
        let lister = lister(
            store_with(docs).await,
            StaticMetrics::empty(),
            StaticExemptions::empty(),
        );
        let request = ListRequest {
            start_index: Some(1),
            items_per_page: Some(2),
            register_view: false,
        };
        let list = lister.list_standard(COMPANY, &request).await.unwrap();
        let names: Vec<_> = list.items.iter().filter_map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Person id1", "Person id2"]);
        assert_eq!(list.start_index, 1);
        assert_eq!(list.items_per_page, 2);
    }

    #[tokio::test]
    async fn register_view_filters_by_cutoff_and_counts_ceased_locally() {
        let store = store_with(vec![
            document("a", None),
            document("b", Some(date(2021, 6, 1))),
            document("c", Some(date(2019, 6, 1))),
            document("d", Some(date(2020, 1, 1))),
        ])
        .await;
        let lister = lister(
            store,
            StaticMetrics::with(metrics(Some("public-register"), Some(date(2020, 1, 1)))),
            StaticExemptions::with(exemptions(None)),
        );

        let request = ListRequest {
            register_view: true,
            ..Default::default()
        };
        let list = lister.list(COMPANY, &request).await.unwrap();
        let names: Vec<_> = list.items.iter().filter_map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Person a", "Person b"]);
        assert_eq!(list.ceased_count, Some(1));
        assert_eq!(list.active_count, Some(7));
        assert_eq!(list.total_results, Some(8));
        assert!(list.links.exemptions.is_none());
        assert_eq!(list.items[0].date_of_birth.unwrap().day, Some(12));
    }

    #[tokio::test]
    async fn register_view_requires_public_register() {
        let store = store_with(vec![document("a", None)]).await;
        let request = ListRequest {
            register_view: true,
            ..Default::default()
        };

        for metrics_provider in [
            StaticMetrics::empty(),
            StaticMetrics::with(metrics(None, None)),
            StaticMetrics::with(metrics(Some("election-to-keep-on-registrar"), Some(date(2020, 1, 1)))),
            StaticMetrics::with(metrics(Some("public-register"), None)),
        ] {
            let lister = lister(store.clone(), metrics_provider, StaticExemptions::empty());
            let err = lister.list(COMPANY, &request).await.unwrap_err();
            assert!(matches!(err, PscError::NotFound(_)), "got {err:?}");
        }
    }
}
