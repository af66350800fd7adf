//! Service layer: reconciliation of inbound deltas, kind projection,
//! date-of-birth visibility and list aggregation, plus the [`PscService`]
//! facade the HTTP layer talks to.

pub mod listing;
pub mod psc_service;
pub mod reconciliation;
pub mod transformer;
pub mod visibility;

pub use listing::{ListRequest, PscLister};
pub use psc_service::PscService;
pub use reconciliation::DeltaReconciler;
