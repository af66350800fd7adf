//! Company metrics as returned by the Metrics Provider.
//!
//! Every nested block is optional on the wire; accessors return `None` for
//! any missing link in the chain so callers can branch explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Register status meaning the company keeps its PSC register on the public register.
pub const PUBLIC_REGISTER: &str = "public-register";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyMetrics {
    #[serde(default)]
    pub counts: Option<MetricsCounts>,
    #[serde(default)]
    pub registers: Option<Registers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricsCounts {
    #[serde(default)]
    pub persons_with_significant_control: Option<PscCounts>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PscCounts {
    #[serde(default)]
    pub active_psc_count: Option<i64>,
    #[serde(default)]
    pub ceased_psc_count: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registers {
    #[serde(default)]
    pub persons_with_significant_control: Option<RegisterEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterEntry {
    /// Where the register has moved to, e.g. `public-register`.
    #[serde(default)]
    pub register_type: Option<String>,
    #[serde(default)]
    pub moved_on: Option<NaiveDate>,
}

impl CompanyMetrics {
    fn psc_counts(&self) -> Option<&PscCounts> {
        self.counts
            .as_ref()
            .and_then(|c| c.persons_with_significant_control.as_ref())
    }

    fn psc_register(&self) -> Option<&RegisterEntry> {
        self.registers
            .as_ref()
            .and_then(|r| r.persons_with_significant_control.as_ref())
    }

    pub fn active_count(&self) -> Option<i64> {
        self.psc_counts().and_then(|c| c.active_psc_count)
    }

    pub fn ceased_count(&self) -> Option<i64> {
        self.psc_counts().and_then(|c| c.ceased_psc_count)
    }

    pub fn total_count(&self) -> Option<i64> {
        self.psc_counts().and_then(|c| c.total_count)
    }

    pub fn register_moved_to(&self) -> Option<&str> {
        self.psc_register().and_then(|r| r.register_type.as_deref())
    }

    pub fn register_moved_on(&self) -> Option<NaiveDate> {
        self.psc_register().and_then(|r| r.moved_on)
    }

    pub fn is_on_public_register(&self) -> bool {
        self.register_moved_to() == Some(PUBLIC_REGISTER)
    }
}
