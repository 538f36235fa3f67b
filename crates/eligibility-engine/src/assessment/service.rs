use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{EligibilityResult, Responses, SessionId};
use super::engine::EligibilityEngine;
use super::repository::{
    CompletionEvent, CompletionNotifier, RepositoryError, SessionRecord, SessionRepository,
    SessionStatus,
};
use crate::catalog::{CatalogError, ProviderCatalog};

/// Service composing the engine, session storage, provider catalog, and completion hook.
pub struct AssessmentService<S, N> {
    engine: Arc<EligibilityEngine>,
    sessions: Arc<S>,
    catalog: Arc<dyn ProviderCatalog>,
    notifier: Arc<N>,
}

/// Compare-and-swap retries before a contended session write gives up.
const WRITE_ATTEMPTS: usize = 8;

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("asm-{id:06}"))
}

impl<S, N> AssessmentService<S, N>
where
    S: SessionRepository + 'static,
    N: CompletionNotifier + 'static,
{
    pub fn new(
        engine: EligibilityEngine,
        sessions: Arc<S>,
        catalog: Arc<dyn ProviderCatalog>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions,
            catalog,
            notifier,
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Open a new session with no answers.
    pub fn start(&self) -> Result<SessionRecord, AssessmentServiceError> {
        let record = SessionRecord::new(next_session_id());
        let stored = self.sessions.insert(record)?;
        info!(session = %stored.session_id, "assessment started");
        Ok(stored)
    }

    /// Record or replace one answer. Unknown questions and options are rejected here,
    /// so the engine itself only ever sees values from the questionnaire.
    pub fn answer(
        &self,
        session_id: &SessionId,
        question: &str,
        value: &str,
    ) -> Result<SessionRecord, AssessmentServiceError> {
        let known = self
            .engine
            .questionnaire()
            .question(question)
            .ok_or_else(|| AssessmentServiceError::UnknownQuestion(question.to_string()))?;
        if known.option(value).is_none() {
            return Err(AssessmentServiceError::UnknownOption {
                question: question.to_string(),
                value: value.to_string(),
            });
        }

        for _ in 0..WRITE_ATTEMPTS {
            let mut record = self.load(session_id)?;
            if record.status == SessionStatus::Completed {
                return Err(AssessmentServiceError::AlreadyCompleted(session_id.clone()));
            }

            record.responses.answer(question, value);
            match self.sessions.update(record) {
                Ok(stored) => return Ok(stored),
                Err(RepositoryError::Stale) => {
                    debug!(session = %session_id, question, "answer raced another write, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(RepositoryError::Stale.into())
    }

    /// Score a fully answered session. Completing twice returns the stored result,
    /// and only the write that actually completes the session notifies.
    pub fn complete(
        &self,
        session_id: &SessionId,
    ) -> Result<EligibilityResult, AssessmentServiceError> {
        for _ in 0..WRITE_ATTEMPTS {
            let mut record = self.load(session_id)?;
            if let Some(result) = &record.result {
                return Ok(result.clone());
            }

            let missing = self.engine.questionnaire().unanswered(&record.responses);
            if !missing.is_empty() {
                return Err(AssessmentServiceError::Incomplete { missing });
            }

            let providers = self.catalog.providers()?;
            let result = self.engine.assess(&record.responses, &providers);

            record.status = SessionStatus::Completed;
            record.result = Some(result.clone());
            match self.sessions.update(record) {
                Ok(_) => {
                    self.announce(session_id, &result);
                    return Ok(result);
                }
                Err(RepositoryError::Stale) => {
                    debug!(session = %session_id, "completion raced another write, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(RepositoryError::Stale.into())
    }

    fn announce(&self, session_id: &SessionId, result: &EligibilityResult) {
        info!(
            session = %session_id,
            tier = result.tier.label(),
            confidence = result.confidence_percent,
            providers = result.recommended_providers.len(),
            "assessment completed"
        );

        let event = CompletionEvent {
            session_id: session_id.clone(),
            tier: result.tier,
            condition: result.condition.clone(),
        };
        if let Err(err) = self.notifier.assessment_completed(event) {
            warn!(session = %session_id, error = %err, "completion notification failed");
        }
    }

    /// One-shot assessment without a stored session.
    pub fn assess(&self, responses: &Responses) -> Result<EligibilityResult, AssessmentServiceError> {
        let providers = self.catalog.providers()?;
        Ok(self.engine.assess(responses, &providers))
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        self.load(session_id)
    }

    fn load(&self, session_id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        let record = self
            .sessions
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("option '{value}' is not valid for question '{question}'")]
    UnknownOption { question: String, value: String },
    #[error("assessment incomplete, unanswered: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
    #[error("assessment {0} is already completed")]
    AlreadyCompleted(SessionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
