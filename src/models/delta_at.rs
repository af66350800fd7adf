//! Fixed-width delta ordering token.
//!
//! The token is the source delta timestamp rendered as `yyyyMMddHHmmssSSSSSS`
//! (20 ASCII digits). Recency is the lexical order of the token, so the width
//! and zero padding must never change.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::PscError;

pub const DELTA_AT_FORMAT: &str = "%Y%m%d%H%M%S%6f";
pub const DELTA_AT_WIDTH: usize = 20;

static DELTA_AT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{20}$").expect("static delta_at pattern"));

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeltaAt(String);

impl DeltaAt {
    pub fn parse(raw: &str) -> Result<Self, PscError> {
        let trimmed = raw.trim();
        if DELTA_AT_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(PscError::BadRequest(format!(
                "delta_at must be {DELTA_AT_WIDTH} digits, got '{raw}'"
            )))
        }
    }

    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self(ts.format(DELTA_AT_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `self` may replace state stamped with `stored`.
    pub fn is_newer_than(&self, stored: &DeltaAt) -> bool {
        self > stored
    }
}

impl fmt::Display for DeltaAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DeltaAt {
    type Error = PscError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeltaAt> for String {
    fn from(value: DeltaAt) -> Self {
        value.0
    }
}
