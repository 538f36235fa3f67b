use serde::{Deserialize, Serialize};

use super::domain::{EligibilityResult, Responses, SessionId, Tier};
use super::questionnaire::Questionnaire;

/// Lifecycle of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

/// Repository record holding the answers so far and, once completed, the result.
///
/// `revision` is the write counter the repository compares on `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub responses: Responses,
    pub result: Option<EligibilityResult>,
    #[serde(default)]
    pub revision: u64,
}

impl SessionRecord {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            status: SessionStatus::InProgress,
            responses: Responses::new(),
            result: None,
            revision: 0,
        }
    }

    pub fn view(&self, questionnaire: &Questionnaire) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            status: self.status.label(),
            answered: self.responses.len(),
            remaining: questionnaire.unanswered(&self.responses),
            tier: self.result.as_ref().map(|result| result.tier),
            confidence_percent: self.result.as_ref().map(|result| result.confidence_percent),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
///
/// `update` is a compare-and-swap: it stores `record` only while the stored
/// revision still equals `record.revision`, bumps the revision, and returns the
/// stored copy. A mismatch is [`RepositoryError::Stale`].
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record changed since it was read")]
    Stale,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook fired after an assessment completes (counters, CRM adapters, ...).
pub trait CompletionNotifier: Send + Sync {
    fn assessment_completed(&self, event: CompletionEvent) -> Result<(), NotifyError>;
}

/// Payload describing a completed assessment without the respondent's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub session_id: SessionId,
    pub tier: Tier,
    pub condition: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Notifier that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn assessment_completed(&self, _event: CompletionEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Sanitized representation of a session's progress.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub answered: usize,
    pub remaining: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<u8>,
}
