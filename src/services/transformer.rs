//! Canonical record -> public projection.
//!
//! Pure functions. Each kind has its own projection with its own field subset
//! and address shape; [`project`] dispatches on the target kind. A record
//! without a public data block has no projection (`None`).
//!
//! Date-of-birth exposure is decided by the caller (see `visibility`) and
//! passed in as `show_dob_day`.

use crate::models::{
    BeneficialOwnerAddress, CorporateEntity, CorporateEntityBeneficialOwner, DateOfBirth,
    EntityType, Individual, IndividualBeneficialOwner, LegalPerson, LegalPersonBeneficialOwner,
    LegalPersonIdentification, ListSummary, PscDocument, PscKind, PscProjection, SuperSecure,
    SuperSecureDescription,
};

/// Project `document` into the output shape for `kind`.
pub fn project(document: &PscDocument, kind: PscKind, show_dob_day: bool) -> Option<PscProjection> {
    match kind {
        PscKind::Individual => {
            to_individual(document, show_dob_day).map(PscProjection::Individual)
        }
        PscKind::IndividualBeneficialOwner => {
            to_individual_beneficial_owner(document, show_dob_day)
                .map(PscProjection::IndividualBeneficialOwner)
        }
        PscKind::CorporateEntity => {
            to_corporate_entity(document).map(PscProjection::CorporateEntity)
        }
        PscKind::CorporateEntityBeneficialOwner => {
            to_corporate_entity_beneficial_owner(document)
                .map(PscProjection::CorporateEntityBeneficialOwner)
        }
        PscKind::LegalPerson => to_legal_person(document).map(PscProjection::LegalPerson),
        PscKind::LegalPersonBeneficialOwner => {
            to_legal_person_beneficial_owner(document).map(PscProjection::LegalPersonBeneficialOwner)
        }
        PscKind::SuperSecure => {
            to_super_secure(document, kind).map(PscProjection::SuperSecure)
        }
        PscKind::SuperSecureBeneficialOwner => {
            to_super_secure(document, kind).map(PscProjection::SuperSecureBeneficialOwner)
        }
    }
}

fn date_of_birth(document: &PscDocument, show_day: bool) -> Option<DateOfBirth> {
    document.date_of_birth().map(|dob| dob.redacted(show_day))
}

pub fn to_individual(document: &PscDocument, show_dob_day: bool) -> Option<Individual> {
    let data = document.data.as_ref()?;
    Some(Individual {
        etag: data.etag.clone(),
        kind: PscKind::Individual,
        name: data.name.clone(),
        name_elements: data.name_elements.clone(),
        nationality: data.nationality.clone(),
        country_of_residence: data.country_of_residence.clone(),
        address: data.address.clone(),
        date_of_birth: date_of_birth(document, show_dob_day),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        links: data.links.clone(),
    })
}

pub fn to_individual_beneficial_owner(
    document: &PscDocument,
    show_dob_day: bool,
) -> Option<IndividualBeneficialOwner> {
    let data = document.data.as_ref()?;
    Some(IndividualBeneficialOwner {
        etag: data.etag.clone(),
        kind: PscKind::IndividualBeneficialOwner,
        name: data.name.clone(),
        name_elements: data.name_elements.clone(),
        nationality: data.nationality.clone(),
        country_of_residence: data.country_of_residence.clone(),
        address: data.address.as_ref().map(BeneficialOwnerAddress::from),
        date_of_birth: date_of_birth(document, show_dob_day),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        is_sanctioned: data.is_sanctioned,
        links: data.links.clone(),
    })
}

pub fn to_corporate_entity(document: &PscDocument) -> Option<CorporateEntity> {
    let data = document.data.as_ref()?;
    Some(CorporateEntity {
        etag: data.etag.clone(),
        kind: PscKind::CorporateEntity,
        name: data.name.clone(),
        address: data.address.clone(),
        identification: data.identification.clone(),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        links: data.links.clone(),
    })
}

pub fn to_corporate_entity_beneficial_owner(
    document: &PscDocument,
) -> Option<CorporateEntityBeneficialOwner> {
    let data = document.data.as_ref()?;
    Some(CorporateEntityBeneficialOwner {
        etag: data.etag.clone(),
        kind: PscKind::CorporateEntityBeneficialOwner,
        name: data.name.clone(),
        address: data.address.as_ref().map(BeneficialOwnerAddress::from),
        principal_office_address: data.principal_office_address.clone(),
        identification: data.identification.clone(),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        is_sanctioned: data.is_sanctioned,
        links: data.links.clone(),
    })
}

pub fn to_legal_person(document: &PscDocument) -> Option<LegalPerson> {
    let data = document.data.as_ref()?;
    Some(LegalPerson {
        etag: data.etag.clone(),
        kind: PscKind::LegalPerson,
        name: data.name.clone(),
        address: data.address.clone(),
        identification: data
            .identification
            .as_ref()
            .map(LegalPersonIdentification::from),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        links: data.links.clone(),
    })
}

pub fn to_legal_person_beneficial_owner(
    document: &PscDocument,
) -> Option<LegalPersonBeneficialOwner> {
    let data = document.data.as_ref()?;
    Some(LegalPersonBeneficialOwner {
        etag: data.etag.clone(),
        kind: PscKind::LegalPersonBeneficialOwner,
        name: data.name.clone(),
        address: data.address.as_ref().map(BeneficialOwnerAddress::from),
        principal_office_address: data.principal_office_address.clone(),
        identification: data
            .identification
            .as_ref()
            .map(LegalPersonIdentification::from),
        natures_of_control: data.natures_of_control.clone(),
        notified_on: data.notified_on,
        ceased_on: data.ceased_on,
        is_sanctioned: data.is_sanctioned,
        links: data.links.clone(),
    })
}

/// Both super-secure kinds. Name and address are suppressed whatever is stored.
fn to_super_secure(document: &PscDocument, kind: PscKind) -> Option<SuperSecure> {
    let data = document.data.as_ref()?;
    let description = kind.super_secure_description()?;
    Some(SuperSecure {
        etag: data.etag.clone(),
        kind,
        description,
        ceased: if data.ceased.unwrap_or(false) { "1" } else { "0" }.to_string(),
        links: data.links.clone(),
    })
}

/// List-item projection. Takes every public field that is present, drops an
/// unrecognised kind or description instead of failing, and redacts the day
/// of birth unless `register_view` is set. Super-secure items keep only
/// etag, kind, description, ceased flag and links.
pub fn to_list_summary(document: &PscDocument, register_view: bool) -> ListSummary {
    let mut summary = ListSummary {
        kind: document.psc_kind(),
        date_of_birth: date_of_birth(document, register_view),
        ..Default::default()
    };

    if let Some(data) = document.data.as_ref() {
        summary.etag = data.etag.clone();
        summary.ceased = data.ceased;
        summary.description = data
            .description
            .as_deref()
            .and_then(SuperSecureDescription::from_description_str);
        summary.links = data.links.clone();
        if summary.kind.is_some_and(|k| k.entity_type() == EntityType::SuperSecure) {
            summary.date_of_birth = None;
            return summary;
        }

        summary.name = data.name.clone();
        summary.name_elements = data.name_elements.clone();
        summary.nationality = data.nationality.clone();
        summary.country_of_residence = data.country_of_residence.clone();
        summary.address = data.address.clone();
        summary.principal_office_address = data.principal_office_address.clone();
        summary.identification = data.identification.clone();
        summary.natures_of_control = data.natures_of_control.clone();
        summary.notified_on = data.notified_on;
        summary.ceased_on = data.ceased_on;
        summary.is_sanctioned = data.is_sanctioned;
    }

    summary
}
