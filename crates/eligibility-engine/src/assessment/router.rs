use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Responses, SessionId};
use super::repository::{CompletionNotifier, RepositoryError, SessionRepository};
use super::service::{AssessmentService, AssessmentServiceError};

/// Body for recording a single answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub value: String,
}

/// Body for a one-shot assessment.
#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub responses: Responses,
}

/// Router builder exposing the questionnaire, session flow, and one-shot assessment.
pub fn assessment_router<S, N>(service: Arc<AssessmentService<S, N>>) -> Router
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(questions_handler::<S, N>))
        .route("/api/v1/assessments", post(start_handler::<S, N>))
        .route(
            "/api/v1/assessments/:session_id",
            get(status_handler::<S, N>),
        )
        .route(
            "/api/v1/assessments/:session_id/answers",
            put(answer_handler::<S, N>),
        )
        .route(
            "/api/v1/assessments/:session_id/complete",
            post(complete_handler::<S, N>),
        )
        .route("/api/v1/eligibility", post(eligibility_handler::<S, N>))
        .with_state(service)
}

pub(crate) async fn questions_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    let questions = service.engine().questionnaire().questions().to_vec();
    (StatusCode::OK, Json(questions)).into_response()
}

pub(crate) async fn start_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    match service.start() {
        Ok(record) => {
            let view = record.view(service.engine().questionnaire());
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => {
            let view = record.view(service.engine().questionnaire());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn answer_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    match service.answer(&SessionId(session_id), &request.question, &request.value) {
        Ok(record) => {
            let view = record.view(service.engine().questionnaire());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn complete_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    match service.complete(&SessionId(session_id)) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn eligibility_handler<S, N>(
    State(service): State<Arc<AssessmentService<S, N>>>,
    Json(request): Json<EligibilityRequest>,
) -> Response
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    match service.assess(&request.responses) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = match &err {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::UnknownQuestion(_)
        | AssessmentServiceError::UnknownOption { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Incomplete { .. }
        | AssessmentServiceError::AlreadyCompleted(_)
        | AssessmentServiceError::Repository(RepositoryError::Conflict)
        | AssessmentServiceError::Repository(RepositoryError::Stale) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_))
        | AssessmentServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &err {
        AssessmentServiceError::Incomplete { missing } => json!({
            "error": err.to_string(),
            "missing": missing,
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(payload)).into_response()
}
