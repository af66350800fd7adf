//! Collaborator doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use psc_data_api::models::{CompanyExemptions, CompanyMetrics};
use psc_data_api::ports::{
    ChangeNotifier, ExemptionsProvider, MetricsProvider, ResourceChange, Result,
};
use psc_data_api::services::PscService;
use psc_data_api::store::MemoryRecordStore;

pub const COMPANY: &str = "00006400";

#[derive(Default)]
pub struct StubMetrics(pub Option<CompanyMetrics>);

#[async_trait]
impl MetricsProvider for StubMetrics {
    async fn get_metrics(&self, _company_number: &str) -> Result<Option<CompanyMetrics>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct StubExemptions(pub Option<CompanyExemptions>);

#[async_trait]
impl ExemptionsProvider for StubExemptions {
    async fn get_exemptions(&self, _company_number: &str) -> Result<Option<CompanyExemptions>> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event: &'static str,
    pub resource_uri: String,
    pub context_id: String,
    pub deleted_data: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct Notifications(Mutex<Vec<Notification>>);

impl Notifications {
    pub fn all(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, event: &'static str, change: &ResourceChange, deleted: Option<serde_json::Value>) {
        self.0.lock().unwrap().push(Notification {
            event,
            resource_uri: change.resource_uri(),
            context_id: change.context_id.clone(),
            deleted_data: deleted,
        });
    }
}

#[async_trait]
impl ChangeNotifier for Notifications {
    async fn notify_changed(&self, change: &ResourceChange) -> Result<()> {
        self.push("changed", change, None);
        Ok(())
    }

    async fn notify_deleted(
        &self,
        change: &ResourceChange,
        deleted: Option<serde_json::Value>,
    ) -> Result<()> {
        self.push("deleted", change, deleted);
        Ok(())
    }
}

pub struct Harness {
    pub service: Arc<PscService>,
    pub store: MemoryRecordStore,
    pub notifications: Arc<Notifications>,
}

pub fn harness(metrics: Option<CompanyMetrics>, exemptions: Option<CompanyExemptions>) -> Harness {
    let store = MemoryRecordStore::new();
    let notifications = Arc::new(Notifications::default());
    let service = PscService::new(
        Arc::new(store.clone()),
        Arc::new(StubMetrics(metrics)),
        Arc::new(StubExemptions(exemptions)),
        notifications.clone(),
    );
    Harness {
        service: Arc::new(service),
        store,
        notifications,
    }
}

/// Full-record delta body for `kind` at `delta_at` (RFC 3339).
pub fn full_record(id: &str, kind: &str, delta_at: &str) -> serde_json::Value {
    serde_json::json!({
        "external_data": {
            "notification_id": id,
            "psc_id": "psc-1",
            "company_number": COMPANY,
            "data": {
                "name": "Jane Doe",
                "name_elements": {"forename": "Jane", "surname": "Doe"},
                "nationality": "British",
                "address": {"premises": "1", "address_line_1": "High Street", "care_of": "Agent"},
                "identification": {"legal_form": "Limited", "legal_authority": "Companies Act", "registration_number": "123"},
                "natures_of_control": ["ownership-of-shares-75-to-100-percent"],
                "notified_on": "2020-04-06",
                "is_sanctioned": false
            },
            "sensitive_data": {
                "date_of_birth": {"day": 14, "month": 2, "year": 1981}
            }
        },
        "internal_data": {
            "delta_at": delta_at,
            "kind": kind,
            "updated_by": "psc-delta-consumer"
        }
    })
}
