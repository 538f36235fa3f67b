use super::common::*;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{complete_handler, status_handler};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_lists_questionnaire() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/questions")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let questions = payload.as_array().expect("question list");
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["id"], json!("condition"));
}

#[tokio::test]
async fn start_route_creates_session() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/v1/assessments", json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("in_progress"));
    assert_eq!(payload["remaining"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn answer_route_rejects_unknown_option() {
    let (service, _, _) = build_service();
    let session = service.start().expect("session starts");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/assessments/{}/answers", session.session_id),
            json!({ "question": "condition", "value": "hay-fever" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn answer_route_records_progress() {
    let (service, _, _) = build_service();
    let session = service.start().expect("session starts");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/assessments/{}/answers", session.session_id),
            json!({ "question": "condition", "value": "epilepsy" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["answered"], json!(1));
}

#[tokio::test]
async fn complete_handler_reports_missing_questions() {
    let (service, _, _) = build_service();
    let session = service.start().expect("session starts");

    let response = complete_handler::<MemorySessions, MemoryNotifier>(
        State(Arc::new(service)),
        Path(session.session_id.0.clone()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["missing"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn complete_handler_returns_result() {
    let (service, _, _) = build_service();
    let session = service.start().expect("session starts");
    answer_all(&service, &session.session_id, &strongest_responses());

    let response = complete_handler::<MemorySessions, MemoryNotifier>(
        State(Arc::new(service)),
        Path(session.session_id.0.clone()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["tier"], json!("highly_eligible"));
    assert_eq!(payload["confidence_percent"], json!(95));
    assert_eq!(payload["factors"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_session() {
    let (service, _, _) = build_service();

    let response = status_handler::<MemorySessions, MemoryNotifier>(
        State(Arc::new(service)),
        Path("asm-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn eligibility_route_scores_inline_responses() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/eligibility",
            json!({ "responses": boundary_responses() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["tier"], json!("possibly_eligible"));
    assert_eq!(payload["confidence_percent"], json!(40));
    assert_eq!(
        payload["recommended_providers"].as_array().map(Vec::len),
        Some(3)
    );
}

#[tokio::test]
async fn eligibility_route_maps_catalog_failure_to_server_error() {
    let service = service_with_catalog(Arc::new(FailingCatalog));
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/eligibility",
            json!({ "responses": strongest_responses() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
