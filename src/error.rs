//! Error taxonomy for the PSC data service.
//!
//! Every component (reconciliation, projection, visibility, listing) and every
//! port returns `PscError`. The HTTP layer maps variants onto status codes via
//! [`PscError::http_status`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PscError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad gateway: {0}")]
    BadGateway(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PscError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Conflict(_) => 409,
            Self::NotFound(_) => 404,
            Self::BadGateway(_) => 502,
            Self::ServiceUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Staleness rejection for a write whose delta token is not newer than stored state.
    pub fn stale_delta(id: &str, delta_at: &str) -> Self {
        Self::Conflict(format!("stale delta received for {id}: {delta_at}"))
    }
}

pub type Result<T> = std::result::Result<T, PscError>;
