//! HTTP-level tests for the PSC routes, driven through the axum router with
//! an in-memory record store and stub collaborators.

mod common;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use psc_data_api::api::build_router;
use psc_data_api::models::metrics::{MetricsCounts, PscCounts, RegisterEntry, Registers};
use psc_data_api::models::CompanyMetrics;

use common::{full_record, harness, Harness, COMPANY};

const ID: &str = "ZfTs9WeeqpXTqf6dc6FZ4C0H0ZZ";
const INDIVIDUAL: &str = "individual-person-with-significant-control";

fn write_path(id: &str) -> String {
    format!("/company/{COMPANY}/persons-with-significant-control/{id}/full_record")
}

fn read_path(segment: &str, id: &str) -> String {
    format!("/company/{COMPANY}/persons-with-significant-control/{segment}/{id}")
}

async fn send(h: &Harness, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(h.service.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn put(id: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(write_path(id))
        .header("content-type", "application/json")
        .header("x-request-id", "req-123")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(id: &str, delta_at: &str, kind: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(write_path(id))
        .header("x-delta-at", delta_at)
        .header("x-kind", kind)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn public_register_metrics() -> CompanyMetrics {
    CompanyMetrics {
        counts: Some(MetricsCounts {
            persons_with_significant_control: Some(PscCounts {
                active_psc_count: Some(1),
                ceased_psc_count: Some(0),
                total_count: Some(1),
            }),
        }),
        registers: Some(Registers {
            persons_with_significant_control: Some(RegisterEntry {
                register_type: Some("public-register".into()),
                moved_on: Some(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            }),
        }),
    }
}

#[tokio::test]
async fn healthcheck_reports_up() {
    let h = harness(None, None);
    let (status, body) = send(&h, get("/healthcheck")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "UP"}));
}

#[tokio::test]
async fn upsert_then_read_individual() {
    let h = harness(None, None);
    let (status, _) = send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&h, get(&read_path("individual", ID))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], INDIVIDUAL);
    assert_eq!(body["name"], "Jane Doe");
    assert_eq!(body["date_of_birth"], json!({"month": 2, "year": 1981}));
    assert_eq!(body["links"]["self"], read_path("individual", ID));
    assert!(body["etag"].is_string());
    assert!(body.get("identification").is_none());
    assert!(body.get("is_sanctioned").is_none());

    let notifications = h.notifications.all();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].event, "changed");
    assert_eq!(notifications[0].context_id, "req-123");
}

#[tokio::test]
async fn read_with_wrong_kind_or_unknown_segment_is_not_found() {
    let h = harness(None, None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, body) = send(&h, get(&read_path("corporate-entity", ID))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&h, get(&read_path("no-such-kind", ID))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_upsert_is_conflict() {
    let h = harness(None, None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-02T00:00:00Z"))).await;
    let (status, body) = send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T00:00:00Z"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("stale"));
    assert_eq!(h.notifications.all().len(), 1);
}

#[tokio::test]
async fn malformed_writes_are_bad_request() {
    let h = harness(None, None);

    let (status, _) = send(&h, put(ID, &json!({"external_data": {}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown_kind = full_record(ID, INDIVIDUAL, "2024-01-01T00:00:00Z");
    unknown_kind["internal_data"]["kind"] = json!("director");
    let (status, _) = send(&h, put(ID, &unknown_kind)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut missing_id = full_record(ID, INDIVIDUAL, "2024-01-01T00:00:00Z");
    missing_id["external_data"]["notification_id"] = Value::Null;
    let (status, _) = send(&h, put(ID, &missing_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&h, put("other-id", &full_record(ID, INDIVIDUAL, "2024-01-01T00:00:00Z"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&h, delete(ID, "2024", INDIVIDUAL)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&h, delete(ID, "20240101000000000000", "director")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(h.store.is_empty().await);
    assert!(h.notifications.all().is_empty());
}

#[tokio::test]
async fn delete_lifecycle() {
    let h = harness(None, None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, _) = send(&h, delete(ID, "20240101100000000000", INDIVIDUAL)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&h, delete(ID, "20240101100000000001", INDIVIDUAL)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(h.store.is_empty().await);

    let (status, _) = send(&h, get(&read_path("individual", ID))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&h, delete(ID, "20240101100000000002", INDIVIDUAL)).await;
    assert_eq!(status, StatusCode::OK);

    let notifications = h.notifications.all();
    let deletes: Vec<_> = notifications.iter().filter(|n| n.event == "deleted").collect();
    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].deleted_data.as_ref().unwrap()["name"], "Jane Doe");
    assert!(deletes[1].deleted_data.is_none());
}

#[tokio::test]
async fn register_view_read_shows_day_of_birth() {
    let h = harness(Some(public_register_metrics()), None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, body) = send(
        &h,
        get(&format!("{}?register_view=true", read_path("individual", ID))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date_of_birth"], json!({"day": 14, "month": 2, "year": 1981}));
}

#[tokio::test]
async fn register_view_without_public_register_is_not_found() {
    let h = harness(None, None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;
    let (status, _) = send(
        &h,
        get(&format!("{}?register_view=true", read_path("individual", ID))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_clamps_page_size_and_reports_counts() {
    let h = harness(Some(public_register_metrics()), None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, body) = send(
        &h,
        get(&format!(
            "/company/{COMPANY}/persons-with-significant-control?items_per_page=500"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_per_page"], 100);
    assert_eq!(body["start_index"], 0);
    assert_eq!(body["active_count"], 1);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert!(body["items"][0]["date_of_birth"].get("day").is_none());
    assert_eq!(
        body["links"],
        json!({"self": format!("/company/{COMPANY}/persons-with-significant-control")})
    );
}

#[tokio::test]
async fn register_view_list() {
    let h = harness(Some(public_register_metrics()), None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, body) = send(
        &h,
        get(&format!(
            "/company/{COMPANY}/persons-with-significant-control?register_view=true"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["date_of_birth"]["day"], 14);
    assert_eq!(body["ceased_count"], 0);
    assert_eq!(body["total_results"], 1);
}

#[tokio::test]
async fn malformed_query_string_is_json_bad_request() {
    let h = harness(Some(public_register_metrics()), None);
    send(&h, put(ID, &full_record(ID, INDIVIDUAL, "2024-01-01T10:00:00Z"))).await;

    let (status, body) = send(
        &h,
        get(&format!(
            "/company/{COMPANY}/persons-with-significant-control?items_per_page=-1"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid query string"));

    let (status, body) = send(
        &h,
        get(&format!("{}?register_view=maybe", read_path("individual", ID))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
