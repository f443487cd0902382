use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leave_cell::router::leave_routes;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

struct TestContext {
    app: Router,
    store: MockServer,
}

async fn setup() -> TestContext {
    let store = MockServer::start().await;
    let config = TestConfig::with_store_url(&store.uri());

    TestContext {
        app: leave_routes(Arc::new(config.to_app_config())),
        store,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn future_date(days_ahead: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days_ahead)
}

#[tokio::test]
async fn create_leave_with_clear_calendar_is_accepted() {
    let ctx = setup().await;
    let doctor_id = Uuid::new_v4().to_string();
    let start = future_date(10);
    let end = future_date(14);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::doctor_leave_response(
                &Uuid::new_v4().to_string(),
                &doctor_id,
                &start.to_string(),
                &end.to_string(),
                "Pending",
            )
        ])))
        .expect(1)
        .mount(&ctx.store)
        .await;

    let request = json_request(
        "POST",
        "/",
        json!({
            "doctorId": doctor_id,
            "leaveType": "Annual Leave",
            "startDate": start,
            "endDate": end
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Pending");
}

#[tokio::test]
async fn create_leave_overlapping_existing_window_is_rejected() {
    let ctx = setup().await;
    let doctor_id = Uuid::new_v4().to_string();

    let existing = MockStoreResponses::doctor_leave_response(
        &Uuid::new_v4().to_string(),
        &doctor_id,
        &future_date(10).to_string(),
        &future_date(14).to_string(),
        "Approved",
    );

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([existing])))
        .mount(&ctx.store)
        .await;

    // No POST mock: a write attempt would come back as a store error
    // instead of the expected validation failure.
    let request = json_request(
        "POST",
        "/",
        json!({
            "doctorId": doctor_id,
            "leaveType": "Sick Leave",
            "startDate": future_date(13),
            "endDate": future_date(17)
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "The leave period overlaps with an existing leave request"
    );
}

#[tokio::test]
async fn create_leave_cannot_start_in_the_past() {
    let ctx = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    let request = json_request(
        "POST",
        "/",
        json!({
            "doctorId": Uuid::new_v4(),
            "leaveType": "Annual Leave",
            "startDate": future_date(-1),
            "endDate": future_date(3)
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_leave_same_day_window_is_rejected() {
    let ctx = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    let request = json_request(
        "POST",
        "/",
        json!({
            "doctorId": Uuid::new_v4(),
            "leaveType": "Annual Leave",
            "startDate": future_date(5),
            "endDate": future_date(5)
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_other_leave_requires_a_reason() {
    let ctx = setup().await;

    let request = json_request(
        "POST",
        "/",
        json!({
            "doctorId": Uuid::new_v4(),
            "leaveType": "Other",
            "startDate": future_date(5),
            "endDate": future_date(8),
            "reason": "   "
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filter_by_doctor_returns_empty_list_for_unknown_doctor() {
    let ctx = setup().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    let request = Request::builder()
        .uri(format!("/filterBydoc/{}", doctor_id))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_dates_excludes_the_edited_leave_from_overlap_checks() {
    let ctx = setup().await;
    let doctor_id = Uuid::new_v4().to_string();
    let leave_id = Uuid::new_v4().to_string();

    let current = MockStoreResponses::doctor_leave_response(
        &leave_id,
        &doctor_id,
        &future_date(10).to_string(),
        &future_date(14).to_string(),
        "Pending",
    );

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("id", format!("eq.{}", leave_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([current.clone()])))
        .mount(&ctx.store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([current])))
        .mount(&ctx.store)
        .await;

    let mut updated = MockStoreResponses::doctor_leave_response(
        &leave_id,
        &doctor_id,
        &future_date(11).to_string(),
        &future_date(13).to_string(),
        "Pending",
    );
    updated["start_date"] = json!(future_date(11));

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("id", format!("eq.{}", leave_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([updated])))
        .expect(1)
        .mount(&ctx.store)
        .await;

    // The new window sits inside the record's own former interval, which
    // must not count as an overlap.
    let request = json_request(
        "PUT",
        &format!("/{}/update", leave_id),
        json!({
            "startDate": future_date(11),
            "endDate": future_date(13)
        }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Leave request updated");
}

#[tokio::test]
async fn status_transitions_are_unconditional_writes() {
    let ctx = setup().await;
    let doctor_id = Uuid::new_v4().to_string();
    let leave_id = Uuid::new_v4().to_string();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/doctor_leaves"))
        .and(query_param("id", format!("eq.{}", leave_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_leave_response(
                &leave_id,
                &doctor_id,
                &future_date(1).to_string(),
                &future_date(4).to_string(),
                "Ongoing",
            )
        ])))
        .mount(&ctx.store)
        .await;

    let request = json_request(
        "PUT",
        &format!("/{}/status", leave_id),
        json!({ "status": "Ongoing" }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["leave"]["status"], "Ongoing");
}

#[tokio::test]
async fn status_update_on_missing_leave_is_404() {
    let ctx = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    let request = json_request(
        "PUT",
        &format!("/{}/status", Uuid::new_v4()),
        json!({ "status": "Taken" }),
    );
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_leave_is_404() {
    let ctx = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctor_leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.store)
        .await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
