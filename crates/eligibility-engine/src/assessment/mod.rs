//! Eligibility assessment: questionnaire weights, scoring, tier classification,
//! condition-to-specialty mapping, provider matching, and the session flow that
//! feeds them.
//!
//! Everything below `engine` is pure and synchronous; `service` and `router`
//! wrap it with session storage, the provider catalog, and HTTP.

pub mod domain;
mod engine;
mod matching;
mod questionnaire;
pub mod repository;
pub mod router;
mod scoring;
pub mod service;
mod specialties;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerOption, EligibilityResult, Provider, Question, Responses, SessionId, Tier,
};
pub use engine::{assess, EligibilityEngine};
pub use matching::{matching_providers, recommend_providers, DEFAULT_RECOMMENDATION_LIMIT};
pub use questionnaire::{
    Questionnaire, QuestionnaireError, CONDITION_QUESTION, DURATION_QUESTION, LOCATION_QUESTION,
    PRIORITY_QUESTION, TREATMENTS_QUESTION,
};
pub use repository::{
    CompletionEvent, CompletionNotifier, NoopNotifier, NotifyError, RepositoryError,
    SessionRecord, SessionRepository, SessionStatus, SessionView,
};
pub use router::assessment_router;
pub use scoring::{
    classify, score, Classification, ScoreCard, ScoreComponent, CONFIDENCE_CEILING,
    CONFIDENCE_FLOOR,
};
pub use service::{AssessmentService, AssessmentServiceError};
pub use specialties::SpecialtyMap;
