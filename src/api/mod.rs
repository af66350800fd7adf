//! HTTP surface.

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::services::PscService;

pub mod error;
pub mod handlers;

pub use error::AppError;

/// Single route for reads and writes on one PSC. The router needs one
/// parameter name per segment position, so the two trailing segments are
/// interpreted per method: `{notification_id}/full_record` for PUT and
/// DELETE, `{kind segment}/{notification_id}` for GET.
const PSC_ITEM_ROUTE: &str = "/company/:company_number/persons-with-significant-control/:item/:sub";

const PSC_LIST_ROUTE: &str = "/company/:company_number/persons-with-significant-control";

/// Build the full axum router.
pub fn build_router(service: Arc<PscService>) -> Router {
    Router::new()
        .route("/healthcheck", get(handlers::healthcheck))
        .route(PSC_LIST_ROUTE, get(handlers::list_pscs))
        .route(
            PSC_ITEM_ROUTE,
            put(handlers::upsert_full_record)
                .delete(handlers::delete_full_record)
                .get(handlers::get_psc),
        )
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(service)),
        )
}
