//! Value types shared by the canonical record and the public projections.

use serde::{Deserialize, Serialize};

/// Full postal address, as stored and as rendered for principal PSC kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Address subset rendered for beneficial-owner kinds (no care-of, no PO box).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeneficialOwnerAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premises: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl From<&Address> for BeneficialOwnerAddress {
    fn from(a: &Address) -> Self {
        Self {
            address_line_1: a.address_line_1.clone(),
            address_line_2: a.address_line_2.clone(),
            country: a.country.clone(),
            locality: a.locality.clone(),
            postal_code: a.postal_code.clone(),
            premises: a.premises.clone(),
            region: a.region.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_forenames: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

/// Date of birth. Month and year are always public; day only under register view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateOfBirth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl DateOfBirth {
    /// Copy with the day component kept or dropped.
    pub fn redacted(&self, show_day: bool) -> Self {
        Self {
            day: if show_day { self.day } else { None },
            month: self.month,
            year: self.year,
        }
    }
}

/// Registration details of a corporate or legal-person PSC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_registered: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_registered: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

/// Legal persons expose only their legal form and governing authority.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalPersonIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_authority: Option<String>,
}

impl From<&Identification> for LegalPersonIdentification {
    fn from(i: &Identification) -> Self {
        Self {
            legal_form: i.legal_form.clone(),
            legal_authority: i.legal_authority.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_address() -> Address {
        Address {
            address_line_1: Some("1 High Street".into()),
            address_line_2: Some("Floor 2".into()),
            care_of: Some("Agent Ltd".into()),
            country: Some("England".into()),
            locality: Some("Cardiff".into()),
            po_box: Some("PO 12".into()),
            postal_code: Some("CF14 3UZ".into()),
            premises: Some("Crown Way".into()),
            region: Some("South Glamorgan".into()),
        }
    }

    #[test]
    fn beneficial_owner_address_drops_care_of_and_po_box() {
        let bo = BeneficialOwnerAddress::from(&full_address());
        let json = serde_json::to_value(&bo).unwrap();
        assert!(json.get("care_of").is_none());
        assert!(json.get("po_box").is_none());
        assert_eq!(json["postal_code"], "CF14 3UZ");
    }

    #[test]
    fn redacted_date_of_birth_keeps_month_and_year() {
        let dob = DateOfBirth {
            day: Some(21),
            month: Some(4),
            year: Some(1980),
        };
        assert_eq!(dob.redacted(false).day, None);
        assert_eq!(dob.redacted(false).month, Some(4));
        assert_eq!(dob.redacted(true), dob);
    }

    #[test]
    fn legal_person_identification_is_a_subset() {
        let id = Identification {
            legal_form: Some("Trust".into()),
            legal_authority: Some("Trusts Act".into()),
            country_registered: Some("Jersey".into()),
            place_registered: Some("St Helier".into()),
            registration_number: Some("12345".into()),
        };
        let json = serde_json::to_value(LegalPersonIdentification::from(&id)).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn item_links_serialise_self_key() {
        let links = ItemLinks {
            self_link: Some("/x".into()),
            statement: None,
        };
        assert_eq!(serde_json::to_value(&links).unwrap(), serde_json::json!({"self": "/x"}));
    }
}
