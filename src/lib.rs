//! PSC data service.
//!
//! Stores one canonical record per person with significant control,
//! reconciles inbound deltas by their ordering token, projects records into
//! eight kind-specific public shapes and applies the register-view
//! date-of-birth policy.
//!
//! - [`services::reconciliation`]: staleness-checked upsert and delete with
//!   change notification
//! - [`services::transformer`]: canonical record to kind projection
//! - [`services::visibility`]: date-of-birth redaction policy
//! - [`services::listing`]: paginated lists with counts and exemptions link
//!
//! Collaborators (record store, metrics, exemptions, change notifier) sit
//! behind the traits in [`ports`].

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod services;
pub mod store;

#[cfg(feature = "database")]
pub mod database;

#[cfg(feature = "server")]
pub mod api;

pub use error::PscError;
pub use services::PscService;
