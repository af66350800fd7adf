//! Company PSC exemptions as returned by the Exemptions Provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyExemptions {
    #[serde(default)]
    pub exemptions: Option<Exemptions>,
}

/// The four PSC exemption categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exemptions {
    #[serde(default)]
    pub psc_exempt_as_trading_on_regulated_market: Option<ExemptionCategory>,
    #[serde(default)]
    pub psc_exempt_as_shares_admitted_on_market: Option<ExemptionCategory>,
    #[serde(default)]
    pub psc_exempt_as_trading_on_uk_regulated_market: Option<ExemptionCategory>,
    #[serde(default)]
    pub psc_exempt_as_trading_on_eu_regulated_market: Option<ExemptionCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExemptionCategory {
    #[serde(default)]
    pub items: Vec<ExemptionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExemptionItem {
    pub exempt_from: NaiveDate,
    #[serde(default)]
    pub exempt_to: Option<NaiveDate>,
}

impl Exemptions {
    fn categories(&self) -> [Option<&ExemptionCategory>; 4] {
        [
            self.psc_exempt_as_trading_on_regulated_market.as_ref(),
            self.psc_exempt_as_shares_admitted_on_market.as_ref(),
            self.psc_exempt_as_trading_on_uk_regulated_market.as_ref(),
            self.psc_exempt_as_trading_on_eu_regulated_market.as_ref(),
        ]
    }

    /// True if any category holds an item with no end date.
    pub fn has_active_exemption(&self) -> bool {
        self.categories()
            .into_iter()
            .flatten()
            .flat_map(|c| c.items.iter())
            .any(|item| item.exempt_to.is_none())
    }
}

impl CompanyExemptions {
    pub fn has_active_exemption(&self) -> bool {
        self.exemptions
            .as_ref()
            .is_some_and(Exemptions::has_active_exemption)
    }
}
