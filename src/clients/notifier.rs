//! Resource-changed API client.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use super::ApiClient;
use crate::error::PscError;
use crate::ports::{ChangeNotifier, ResourceChange, Result};

const RESOURCE_CHANGED_PATH: &str = "/resource-changed";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum EventType {
    Changed,
    Deleted,
}

#[derive(Debug, Serialize)]
struct ChangeEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    published_at: String,
}

#[derive(Debug, Serialize)]
struct ChangedResource<'a> {
    resource_uri: String,
    resource_kind: &'static str,
    context_id: &'a str,
    resource_id: &'a str,
    event: ChangeEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_data: Option<serde_json::Value>,
}

impl<'a> ChangedResource<'a> {
    fn new(
        change: &'a ResourceChange,
        event_type: EventType,
        deleted_data: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_uri: change.resource_uri(),
            resource_kind: change.kind.resource_kind(),
            context_id: &change.context_id,
            resource_id: &change.notification_id,
            event: ChangeEvent {
                event_type,
                published_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            deleted_data,
        }
    }
}

/// Posts change events to the resource-changed API.
pub struct HttpChangeNotifier {
    api: ApiClient,
}

impl HttpChangeNotifier {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn send(&self, body: &ChangedResource<'_>) -> Result<()> {
        let response = self
            .api
            .post(RESOURCE_CHANGED_PATH)
            .json(body)
            .send()
            .await
            .map_err(|e| PscError::ServiceUnavailable(format!("resource-changed call failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PscError::ServiceUnavailable(format!(
                "resource-changed returned {status} for {}",
                body.resource_uri
            )));
        }
        info!(
            resource_uri = %body.resource_uri,
            context_id = body.context_id,
            event = ?body.event.event_type,
            "change notification sent"
        );
        Ok(())
    }
}

#[async_trait]
impl ChangeNotifier for HttpChangeNotifier {
    async fn notify_changed(&self, change: &ResourceChange) -> Result<()> {
        self.send(&ChangedResource::new(change, EventType::Changed, None, Utc::now()))
            .await
    }

    async fn notify_deleted(
        &self,
        change: &ResourceChange,
        deleted: Option<serde_json::Value>,
    ) -> Result<()> {
        self.send(&ChangedResource::new(
            change,
            EventType::Deleted,
            deleted,
            Utc::now(),
        ))
        .await
    }
}
