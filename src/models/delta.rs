//! Inbound write requests: full-record deltas and deletion notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::delta_at::DeltaAt;
use super::document::{PscData, PscSensitiveData};
use super::kind::PscKind;

/// Full-record delta pushed by the upstream producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullRecordPsc {
    pub external_data: ExternalData,
    pub internal_data: InternalData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalData {
    #[serde(default)]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub psc_id: Option<String>,
    pub company_number: String,
    #[serde(default)]
    pub data: Option<PscData>,
    #[serde(default)]
    pub sensitive_data: Option<PscSensitiveData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalData {
    /// Source timestamp of the delta; rendered into the ordering token.
    pub delta_at: DateTime<Utc>,
    pub kind: PscKind,
    #[serde(default = "default_updated_by")]
    pub updated_by: String,
}

fn default_updated_by() -> String {
    "unknown".to_string()
}

impl FullRecordPsc {
    pub fn delta_at(&self) -> DeltaAt {
        DeltaAt::from_timestamp(self.internal_data.delta_at)
    }
}

/// Deletion notice. The delta token arrives already rendered.
#[derive(Debug, Clone)]
pub struct DeletePscRequest {
    pub company_number: String,
    pub notification_id: String,
    pub delta_at: DeltaAt,
    pub kind: PscKind,
    pub context_id: String,
}
