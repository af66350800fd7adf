//! Domain types: canonical record, inbound deltas, public projections and
//! collaborator payloads.

pub mod common;
pub mod delta;
pub mod delta_at;
pub mod document;
pub mod exemptions;
pub mod kind;
pub mod metrics;
pub mod psc;

pub use common::{
    Address, BeneficialOwnerAddress, DateOfBirth, Identification, ItemLinks,
    LegalPersonIdentification, NameElements,
};
pub use delta::{DeletePscRequest, ExternalData, FullRecordPsc, InternalData};
pub use delta_at::DeltaAt;
pub use document::{Created, PscData, PscDocument, PscSensitiveData, Updated};
pub use exemptions::{CompanyExemptions, ExemptionCategory, ExemptionItem, Exemptions};
pub use kind::{EntityType, PscKind, PscRole, SuperSecureDescription};
pub use metrics::{CompanyMetrics, PUBLIC_REGISTER};
pub use psc::{
    CorporateEntity, CorporateEntityBeneficialOwner, Individual, IndividualBeneficialOwner,
    LegalPerson, LegalPersonBeneficialOwner, ListSummary, PscList, PscListLinks, PscProjection,
    SuperSecure,
};
