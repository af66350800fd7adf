//! Canonical stored PSC record.
//!
//! One document per notification id. Which optional blocks are populated
//! depends on the kind: name elements and sensitive data only for
//! individuals, identification only for corporate/legal kinds, principal
//! office address and sanction flag only for beneficial owners, description
//! only for super-secure kinds. The ceased flag may appear on any kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Address, DateOfBirth, Identification, ItemLinks, NameElements};
use super::delta_at::DeltaAt;
use super::kind::PscKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Created {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Updated {
    pub at: DateTime<Utc>,
    pub by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PscDocument {
    /// Notification id; stable across updates to the same PSC.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psc_id: Option<String>,
    pub company_number: String,
    pub delta_at: DeltaAt,
    /// Raw discriminator as persisted. Documents written by this service always
    /// carry a known kind; older rows may not.
    pub kind: String,
    pub created: Created,
    pub updated: Updated,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PscData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_data: Option<PscSensitiveData>,
}

impl PscDocument {
    pub fn psc_kind(&self) -> Option<PscKind> {
        PscKind::from_kind_str(&self.kind)
    }

    /// Read-by-kind guard: same company and same discriminator.
    pub fn matches(&self, company_number: &str, kind: PscKind) -> bool {
        self.company_number == company_number && self.kind == kind.as_str()
    }

    pub fn ceased_on(&self) -> Option<NaiveDate> {
        self.data.as_ref().and_then(|d| d.ceased_on)
    }

    pub fn ceased(&self) -> bool {
        self.data.as_ref().and_then(|d| d.ceased).unwrap_or(false)
    }

    pub fn date_of_birth(&self) -> Option<DateOfBirth> {
        self.sensitive_data.as_ref().and_then(|s| s.date_of_birth)
    }
}

/// Public block, visible to every caller subject to redaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PscData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_elements: Option<NameElements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_office_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<Identification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceased: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sanctioned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Individual-only block. Never rendered except for the (possibly redacted)
/// date of birth.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PscSensitiveData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usual_residential_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residential_address_same_as_service_address: Option<bool>,
}
