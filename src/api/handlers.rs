//! Route handlers.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::error::AppError;
use crate::error::PscError;
use crate::models::{DeletePscRequest, DeltaAt, FullRecordPsc, PscKind, PscList, PscProjection};
use crate::services::{ListRequest, PscService};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const DELTA_AT_HEADER: &str = "x-delta-at";
pub const KIND_HEADER: &str = "x-kind";

const FULL_RECORD: &str = "full_record";

#[derive(Debug, Default, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub register_view: bool,
}

fn context_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, PscError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PscError::BadRequest(format!("missing {name} header")))
}

/// PUT `.../:notification_id/full_record`
pub async fn upsert_full_record(
    Extension(service): Extension<Arc<PscService>>,
    headers: HeaderMap,
    Path((company_number, notification_id, action)): Path<(String, String, String)>,
    payload: Result<Json<FullRecordPsc>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    if action != FULL_RECORD {
        return Err(PscError::not_found(format!("no such resource: {action}")).into());
    }
    let Json(delta) =
        payload.map_err(|e| PscError::BadRequest(format!("invalid request body: {e}")))?;
    if let Some(body_id) = delta.external_data.notification_id.as_deref() {
        if body_id != notification_id {
            return Err(PscError::BadRequest(format!(
                "notification id {body_id} does not match request path {notification_id}"
            ))
            .into());
        }
    }

    let context_id = context_id(&headers);
    info!(%company_number, %notification_id, %context_id, "upsert PSC full record");
    service.upsert(&company_number, delta, &context_id).await?;
    Ok(StatusCode::OK)
}

/// DELETE `.../:notification_id/full_record`, with the delta token and kind
/// supplied as headers.
pub async fn delete_full_record(
    Extension(service): Extension<Arc<PscService>>,
    headers: HeaderMap,
    Path((company_number, notification_id, action)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    if action != FULL_RECORD {
        return Err(PscError::not_found(format!("no such resource: {action}")).into());
    }
    let request = DeletePscRequest {
        delta_at: DeltaAt::parse(required_header(&headers, DELTA_AT_HEADER)?)?,
        kind: required_header(&headers, KIND_HEADER)?.trim().parse::<PscKind>()?,
        context_id: context_id(&headers),
        company_number,
        notification_id,
    };

    info!(
        company_number = %request.company_number,
        notification_id = %request.notification_id,
        context_id = %request.context_id,
        "delete PSC full record"
    );
    service.delete(&request).await?;
    Ok(StatusCode::OK)
}

/// GET `.../:segment/:notification_id[?register_view=true]`
pub async fn get_psc(
    Extension(service): Extension<Arc<PscService>>,
    Path((company_number, segment, notification_id)): Path<(String, String, String)>,
    query: Result<Query<ReadQuery>, QueryRejection>,
) -> Result<Json<PscProjection>, AppError> {
    let Query(query) = query.map_err(invalid_query)?;
    let kind = PscKind::from_path_segment(&segment)
        .ok_or_else(|| PscError::not_found(format!("unknown PSC type: {segment}")))?;
    let projection = service
        .get_psc(&company_number, &notification_id, kind, query.register_view)
        .await?;
    Ok(Json(projection))
}

/// GET `/company/:company_number/persons-with-significant-control`
pub async fn list_pscs(
    Extension(service): Extension<Arc<PscService>>,
    Path(company_number): Path<String>,
    query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<PscList>, AppError> {
    let Query(request) = query.map_err(invalid_query)?;
    Ok(Json(service.list(&company_number, &request).await?))
}

fn invalid_query(rejection: QueryRejection) -> PscError {
    PscError::BadRequest(format!("invalid query string: {rejection}"))
}

pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

pub async fn not_found() -> AppError {
    PscError::not_found("no such resource").into()
}
