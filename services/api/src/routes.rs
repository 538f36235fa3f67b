use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use eligibility_engine::assessment::{
    assessment_router, AssessmentService, CompletionNotifier, SessionRepository,
};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct CheckerStats {
    pub(crate) checkers: u64,
    pub(crate) completed_since_start: u64,
}

pub(crate) fn with_assessment_routes<S, N>(service: Arc<AssessmentService<S, N>>) -> axum::Router
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/stats/checkers", axum::routing::get(checker_stats))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn checker_stats(Extension(state): Extension<AppState>) -> Json<CheckerStats> {
    Json(CheckerStats {
        checkers: state.checkers.total(),
        completed_since_start: state.checkers.completed(),
    })
}
