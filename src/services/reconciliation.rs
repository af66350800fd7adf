//! Delta reconciliation: ordering, persistence and change notification for
//! inbound PSC writes.
//!
//! A write is applied only when its delta token is strictly newer than the
//! stored one for the same notification id. There is no transaction around
//! "check staleness -> write -> notify": the store write commits before the
//! notifier is called, so a notifier failure surfaces as `ServiceUnavailable`
//! with the store already mutated. Upstream retries are idempotent, which is
//! what closes that gap.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::PscError;
use crate::models::{
    Created, DeletePscRequest, DeltaAt, EntityType, FullRecordPsc, ItemLinks, PscData,
    PscDocument, PscKind, PscSensitiveData, Updated,
};
use crate::ports::{ChangeNotifier, RecordStore, ResourceChange, Result};
use crate::services::transformer;

pub struct DeltaReconciler {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn ChangeNotifier>,
    skip_change_notification: bool,
}

impl DeltaReconciler {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            store,
            notifier,
            skip_change_notification: false,
        }
    }

    /// Suppress notifier calls on both write paths (builder pattern).
    pub fn with_skip_change_notification(mut self, skip: bool) -> Self {
        self.skip_change_notification = skip;
        self
    }

    /// Apply a full-record delta for `company_number`.
    pub async fn apply_upsert(
        &self,
        company_number: &str,
        delta: FullRecordPsc,
        context_id: &str,
    ) -> Result<()> {
        let id = delta
            .external_data
            .notification_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PscError::BadRequest("notification_id is required".into()))?
            .to_string();

        if delta.external_data.company_number != company_number {
            return Err(PscError::BadRequest(format!(
                "company number {} does not match request path {}",
                delta.external_data.company_number, company_number
            )));
        }

        let kind = delta.internal_data.kind;
        let delta_at = delta.delta_at();

        if self.store.find_newer_or_equal(&id, &delta_at).await? {
            warn!(
                company_number,
                notification_id = %id,
                delta_at = %delta_at,
                "stale delta received; record not persisted"
            );
            return Err(PscError::stale_delta(&id, delta_at.as_str()));
        }

        let now = Utc::now();
        let created = match self.store.find_by_id(&id).await? {
            Some(existing) => existing.created,
            None => Created { at: now },
        };

        let document = PscDocument {
            psc_id: delta.external_data.psc_id,
            company_number: company_number.to_string(),
            kind: kind.as_str().to_string(),
            created,
            updated: Updated {
                at: now,
                by: delta.internal_data.updated_by,
            },
            data: delta
                .external_data
                .data
                .map(|data| conform_data(data, kind, company_number, &id, &delta_at)),
            sensitive_data: conform_sensitive_data(delta.external_data.sensitive_data, kind),
            delta_at,
            id,
        };

        self.store.save(&document).await?;
        info!(
            company_number,
            notification_id = %document.id,
            kind = %kind,
            delta_at = %document.delta_at,
            "PSC record saved"
        );

        let change = ResourceChange {
            company_number: company_number.to_string(),
            notification_id: document.id.clone(),
            kind,
            context_id: context_id.to_string(),
        };
        if self.skip_change_notification {
            info!(resource_uri = %change.resource_uri(), "change notification suppressed");
            return Ok(());
        }
        self.notifier.notify_changed(&change).await.map_err(|e| {
            error!(resource_uri = %change.resource_uri(), error = %e, "changed notification failed");
            e
        })
    }

    /// Apply a deletion notice. Deleting an unknown record still notifies,
    /// so that upstream retries converge.
    pub async fn apply_delete(&self, request: &DeletePscRequest) -> Result<()> {
        let change = ResourceChange {
            company_number: request.company_number.clone(),
            notification_id: request.notification_id.clone(),
            kind: request.kind,
            context_id: request.context_id.clone(),
        };

        let existing = self
            .store
            .find_by_company_and_id(&request.company_number, &request.notification_id)
            .await?;

        let deleted_data = match existing {
            Some(document) => {
                if !request.delta_at.is_newer_than(&document.delta_at) {
                    warn!(
                        company_number = %request.company_number,
                        notification_id = %request.notification_id,
                        delta_at = %request.delta_at,
                        stored_delta_at = %document.delta_at,
                        "stale delete received; record kept"
                    );
                    return Err(PscError::stale_delta(
                        &request.notification_id,
                        request.delta_at.as_str(),
                    ));
                }

                self.store.delete(&document).await?;
                info!(
                    company_number = %request.company_number,
                    notification_id = %request.notification_id,
                    "PSC record deleted"
                );
                deleted_snapshot(&document, request.kind)
            }
            None => {
                info!(
                    company_number = %request.company_number,
                    notification_id = %request.notification_id,
                    "no PSC record to delete; notifying anyway"
                );
                None
            }
        };

        if self.skip_change_notification {
            info!(resource_uri = %change.resource_uri(), "change notification suppressed");
            return Ok(());
        }
        self.notifier
            .notify_deleted(&change, deleted_data)
            .await
            .map_err(|e| {
                error!(resource_uri = %change.resource_uri(), error = %e, "deleted notification failed");
                e
            })
    }
}

/// Public projection of a just-deleted record, or `None` if it has none.
fn deleted_snapshot(document: &PscDocument, kind: PscKind) -> Option<serde_json::Value> {
    let projection = transformer::project(document, kind, false)?;
    match serde_json::to_value(&projection) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(notification_id = %document.id, error = %e, "could not serialise deleted record");
            None
        }
    }
}

/// Drop public fields the kind does not carry and stamp etag and self link.
fn conform_data(
    mut data: PscData,
    kind: PscKind,
    company_number: &str,
    id: &str,
    delta_at: &DeltaAt,
) -> PscData {
    let entity_type = kind.entity_type();
    if entity_type != EntityType::Individual {
        data.name_elements = None;
        data.nationality = None;
        data.country_of_residence = None;
    }
    let corporate_or_legal = matches!(
        entity_type,
        EntityType::CorporateEntity | EntityType::LegalPerson
    );
    if !corporate_or_legal {
        data.identification = None;
    }
    if !(corporate_or_legal && kind.is_beneficial_owner()) {
        data.principal_office_address = None;
    }
    if !kind.is_beneficial_owner() {
        data.is_sanctioned = None;
    }
    if entity_type == EntityType::SuperSecure {
        data.name = None;
        data.address = None;
        data.natures_of_control = None;
    }
    data.description = kind
        .super_secure_description()
        .map(|d| d.as_str().to_string());

    data.etag = Some(generate_etag(id, delta_at));
    let statement = data.links.as_ref().and_then(|l| l.statement.clone());
    data.links = Some(ItemLinks {
        self_link: Some(kind.resource_uri(company_number, id)),
        statement,
    });
    data
}

fn conform_sensitive_data(
    sensitive: Option<PscSensitiveData>,
    kind: PscKind,
) -> Option<PscSensitiveData> {
    match kind.entity_type() {
        EntityType::Individual => sensitive,
        _ => None,
    }
}

fn generate_etag(id: &str, delta_at: &DeltaAt) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update(delta_at.as_str().as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}
