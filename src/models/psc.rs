//! Public output shapes.
//!
//! One struct per kind, each carrying only the fields that kind exposes, plus
//! the looser list-summary shape and the paginated list envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{
    Address, BeneficialOwnerAddress, DateOfBirth, Identification, ItemLinks,
    LegalPersonIdentification, NameElements,
};
use super::kind::{PscKind, SuperSecureDescription};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Individual {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_elements: Option<NameElements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndividualBeneficialOwner {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_elements: Option<NameElements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BeneficialOwnerAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sanctioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorporateEntity {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<Identification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorporateEntityBeneficialOwner {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BeneficialOwnerAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_office_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<Identification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sanctioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegalPerson {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<LegalPersonIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegalPersonBeneficialOwner {
    pub etag: Option<String>,
    pub kind: PscKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BeneficialOwnerAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_office_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<LegalPersonIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sanctioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

/// Shared by both super-secure kinds. Name and address are never rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuperSecure {
    pub etag: Option<String>,
    pub kind: PscKind,
    pub description: SuperSecureDescription,
    /// `"1"` when ceased, `"0"` otherwise.
    pub ceased: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

/// Any one of the eight kind-specific projections. Serialised without a tag;
/// the `kind` field inside each shape identifies it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PscProjection {
    Individual(Individual),
    IndividualBeneficialOwner(IndividualBeneficialOwner),
    CorporateEntity(CorporateEntity),
    CorporateEntityBeneficialOwner(CorporateEntityBeneficialOwner),
    LegalPerson(LegalPerson),
    LegalPersonBeneficialOwner(LegalPersonBeneficialOwner),
    SuperSecure(SuperSecure),
    SuperSecureBeneficialOwner(SuperSecure),
}

impl PscProjection {
    pub fn kind(&self) -> PscKind {
        match self {
            Self::Individual(p) => p.kind,
            Self::IndividualBeneficialOwner(p) => p.kind,
            Self::CorporateEntity(p) => p.kind,
            Self::CorporateEntityBeneficialOwner(p) => p.kind,
            Self::LegalPerson(p) => p.kind,
            Self::LegalPersonBeneficialOwner(p) => p.kind,
            Self::SuperSecure(p) | Self::SuperSecureBeneficialOwner(p) => p.kind,
        }
    }
}

/// List item. Carries whatever public fields the record has; super-secure
/// items carry no identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PscKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_elements: Option<NameElements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_office_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<Identification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natures_of_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sanctioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<SuperSecureDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ItemLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PscListLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exemptions: Option<String>,
}

/// Paginated list envelope. Counts stay `None` when no source supplied them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PscList {
    pub items: Vec<ListSummary>,
    pub items_per_page: u32,
    pub start_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceased_count: Option<i64>,
    pub links: PscListLinks,
}
