//! PSC kind discriminator and the kind-name mapping table.
//!
//! Eight kinds partition into role (principal PSC vs beneficial owner) and
//! entity type (individual, corporate entity, legal person, super-secure).
//! Every string the service emits for a kind (wire value, URL path segment,
//! notification resource kind) comes from an exhaustive match here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PscError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PscKind {
    #[serde(rename = "individual-person-with-significant-control")]
    Individual,
    #[serde(rename = "individual-beneficial-owner")]
    IndividualBeneficialOwner,
    #[serde(rename = "corporate-entity-person-with-significant-control")]
    CorporateEntity,
    #[serde(rename = "corporate-entity-beneficial-owner")]
    CorporateEntityBeneficialOwner,
    #[serde(rename = "legal-person-person-with-significant-control")]
    LegalPerson,
    #[serde(rename = "legal-person-beneficial-owner")]
    LegalPersonBeneficialOwner,
    #[serde(rename = "super-secure-person-with-significant-control")]
    SuperSecure,
    #[serde(rename = "super-secure-beneficial-owner")]
    SuperSecureBeneficialOwner,
}

/// Principal PSC or beneficial owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PscRole {
    Principal,
    BeneficialOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Individual,
    CorporateEntity,
    LegalPerson,
    SuperSecure,
}

impl PscKind {
    pub const ALL: [PscKind; 8] = [
        PscKind::Individual,
        PscKind::IndividualBeneficialOwner,
        PscKind::CorporateEntity,
        PscKind::CorporateEntityBeneficialOwner,
        PscKind::LegalPerson,
        PscKind::LegalPersonBeneficialOwner,
        PscKind::SuperSecure,
        PscKind::SuperSecureBeneficialOwner,
    ];

    /// Wire value of the discriminator, as stored and emitted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual-person-with-significant-control",
            Self::IndividualBeneficialOwner => "individual-beneficial-owner",
            Self::CorporateEntity => "corporate-entity-person-with-significant-control",
            Self::CorporateEntityBeneficialOwner => "corporate-entity-beneficial-owner",
            Self::LegalPerson => "legal-person-person-with-significant-control",
            Self::LegalPersonBeneficialOwner => "legal-person-beneficial-owner",
            Self::SuperSecure => "super-secure-person-with-significant-control",
            Self::SuperSecureBeneficialOwner => "super-secure-beneficial-owner",
        }
    }

    /// Path segment used in resource URIs and read routes.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::IndividualBeneficialOwner => "individual-beneficial-owner",
            Self::CorporateEntity => "corporate-entity",
            Self::CorporateEntityBeneficialOwner => "corporate-entity-beneficial-owner",
            Self::LegalPerson => "legal-person",
            Self::LegalPersonBeneficialOwner => "legal-person-beneficial-owner",
            Self::SuperSecure => "super-secure",
            Self::SuperSecureBeneficialOwner => "super-secure-beneficial-owner",
        }
    }

    /// Resource kind attached to change notifications.
    pub fn resource_kind(&self) -> &'static str {
        match self {
            Self::Individual => "company-psc-individual",
            Self::IndividualBeneficialOwner => "company-psc-individual-beneficial-owner",
            Self::CorporateEntity => "company-psc-corporate-entity",
            Self::CorporateEntityBeneficialOwner => "company-psc-corporate-entity-beneficial-owner",
            Self::LegalPerson => "company-psc-legal-person",
            Self::LegalPersonBeneficialOwner => "company-psc-legal-person-beneficial-owner",
            Self::SuperSecure => "company-psc-super-secure",
            Self::SuperSecureBeneficialOwner => "company-psc-super-secure-beneficial-owner",
        }
    }

    pub fn role(&self) -> PscRole {
        match self {
            Self::Individual | Self::CorporateEntity | Self::LegalPerson | Self::SuperSecure => {
                PscRole::Principal
            }
            Self::IndividualBeneficialOwner
            | Self::CorporateEntityBeneficialOwner
            | Self::LegalPersonBeneficialOwner
            | Self::SuperSecureBeneficialOwner => PscRole::BeneficialOwner,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Individual | Self::IndividualBeneficialOwner => EntityType::Individual,
            Self::CorporateEntity | Self::CorporateEntityBeneficialOwner => {
                EntityType::CorporateEntity
            }
            Self::LegalPerson | Self::LegalPersonBeneficialOwner => EntityType::LegalPerson,
            Self::SuperSecure | Self::SuperSecureBeneficialOwner => EntityType::SuperSecure,
        }
    }

    pub fn is_beneficial_owner(&self) -> bool {
        self.role() == PscRole::BeneficialOwner
    }

    /// Fixed description rendered for super-secure kinds.
    pub fn super_secure_description(&self) -> Option<SuperSecureDescription> {
        match self {
            Self::SuperSecure => Some(SuperSecureDescription::SuperSecurePersonsWithSignificantControl),
            Self::SuperSecureBeneficialOwner => Some(SuperSecureDescription::SuperSecureBeneficialOwner),
            _ => None,
        }
    }

    pub fn from_kind_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn from_path_segment(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path_segment() == s)
    }

    /// Resource URI of one PSC: `/company/{cn}/persons-with-significant-control/{segment}/{id}`.
    pub fn resource_uri(&self, company_number: &str, notification_id: &str) -> String {
        format!(
            "/company/{}/persons-with-significant-control/{}/{}",
            company_number,
            self.path_segment(),
            notification_id
        )
    }
}

impl fmt::Display for PscKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PscKind {
    type Err = PscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_kind_str(s).ok_or_else(|| PscError::BadRequest(format!("unknown kind: {s}")))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SuperSecureDescription {
    #[serde(rename = "super-secure-persons-with-significant-control")]
    SuperSecurePersonsWithSignificantControl,
    #[serde(rename = "super-secure-beneficial-owner")]
    SuperSecureBeneficialOwner,
}

impl SuperSecureDescription {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperSecurePersonsWithSignificantControl => {
                "super-secure-persons-with-significant-control"
            }
            Self::SuperSecureBeneficialOwner => "super-secure-beneficial-owner",
        }
    }

    pub fn from_description_str(s: &str) -> Option<Self> {
        match s {
            "super-secure-persons-with-significant-control" => {
                Some(Self::SuperSecurePersonsWithSignificantControl)
            }
            "super-secure-beneficial-owner" => Some(Self::SuperSecureBeneficialOwner),
            _ => None,
        }
    }
}
