use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{Provider, Responses, SessionId};
use crate::assessment::repository::{
    CompletionEvent, CompletionNotifier, NotifyError, RepositoryError, SessionRecord,
    SessionRepository,
};
use crate::assessment::{
    assessment_router, AssessmentService, EligibilityEngine, CONDITION_QUESTION,
    DURATION_QUESTION, LOCATION_QUESTION, PRIORITY_QUESTION, TREATMENTS_QUESTION,
};
use crate::catalog::{CatalogError, ProviderCatalog, StaticCatalog};

pub(super) fn provider(id: &str, specialties: &[&str]) -> Provider {
    Provider {
        id: id.to_string(),
        name: format!("{id} clinic"),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        rating: 4.5,
        price_from: Some(99),
        wait_time: "1 week".to_string(),
        booking_url: format!("https://providers.example.com/{id}"),
    }
}

pub(super) fn catalog() -> Vec<Provider> {
    vec![
        provider("general", &["General Practice"]),
        provider("calm", &["Mental Health", "Anxiety"]),
        provider("northway", &["Chronic Pain Management", "Physiotherapy"]),
        provider("neuro", &["Neurology", "Epilepsy"]),
        provider("restful", &["Sleep Medicine"]),
    ]
}

pub(super) fn responses(
    condition: &str,
    duration: &str,
    treatments: &str,
    location: &str,
    priority: &str,
) -> Responses {
    Responses::new()
        .with(CONDITION_QUESTION, condition)
        .with(DURATION_QUESTION, duration)
        .with(TREATMENTS_QUESTION, treatments)
        .with(LOCATION_QUESTION, location)
        .with(PRIORITY_QUESTION, priority)
}

pub(super) fn strongest_responses() -> Responses {
    responses(
        "epilepsy",
        "5-plus-years",
        "multiple-limited",
        "england",
        "pain-relief",
    )
}

pub(super) fn boundary_responses() -> Responses {
    responses(
        "exploring",
        "under-6-months",
        "prefer-not-say",
        "prefer-not-say",
        "all-above",
    )
}

pub(super) type TestService = AssessmentService<MemorySessions, MemoryNotifier>;

pub(super) fn build_service() -> (TestService, Arc<MemorySessions>, Arc<MemoryNotifier>) {
    let sessions = Arc::new(MemorySessions::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = AssessmentService::new(
        EligibilityEngine::standard(),
        sessions.clone(),
        Arc::new(StaticCatalog::new(catalog())),
        notifier.clone(),
    );
    (service, sessions, notifier)
}

pub(super) fn service_with_catalog(catalog: Arc<dyn ProviderCatalog>) -> TestService {
    AssessmentService::new(
        EligibilityEngine::standard(),
        Arc::new(MemorySessions::default()),
        catalog,
        Arc::new(MemoryNotifier::default()),
    )
}

pub(super) fn service_with_sessions<S: SessionRepository + 'static>(
    sessions: S,
) -> AssessmentService<S, MemoryNotifier> {
    AssessmentService::new(
        EligibilityEngine::standard(),
        Arc::new(sessions),
        Arc::new(StaticCatalog::new(catalog())),
        Arc::new(MemoryNotifier::default()),
    )
}

pub(super) fn answer_all(service: &TestService, session_id: &SessionId, responses: &Responses) {
    for (question, value) in responses.iter() {
        service
            .answer(session_id, question, value)
            .expect("answer accepted");
    }
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemorySessions {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, mut record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        let stored = guard
            .get(&record.session_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.revision != record.revision {
            return Err(RepositoryError::Stale);
        }
        record.revision += 1;
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

type Interleave = Box<dyn FnOnce() + Send>;

/// Shares storage with [`MemorySessions`], and on the next fetch runs a queued
/// write after taking its snapshot, so the caller holds an outdated copy.
pub(super) struct InterleavedSessions {
    inner: MemorySessions,
    pending: Mutex<Option<Interleave>>,
}

impl InterleavedSessions {
    pub(super) fn over(inner: MemorySessions) -> Self {
        Self {
            inner,
            pending: Mutex::new(None),
        }
    }

    pub(super) fn after_next_fetch(&self, write: impl FnOnce() + Send + 'static) {
        *self.pending.lock().expect("interleave mutex poisoned") = Some(Box::new(write));
    }
}

impl SessionRepository for InterleavedSessions {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let snapshot = self.inner.fetch(id)?;
        let pending = self.pending.lock().expect("interleave mutex poisoned").take();
        if let Some(write) = pending {
            write();
        }
        Ok(snapshot)
    }
}

/// Two services over the same storage and notifier; the first reads through
/// [`InterleavedSessions`].
pub(super) fn racing_services() -> (
    AssessmentService<InterleavedSessions, MemoryNotifier>,
    Arc<TestService>,
    Arc<InterleavedSessions>,
    Arc<MemoryNotifier>,
) {
    let storage = MemorySessions::default();
    let interleaved = Arc::new(InterleavedSessions::over(storage.clone()));
    let notifier = Arc::new(MemoryNotifier::default());
    let catalog: Arc<dyn ProviderCatalog> = Arc::new(StaticCatalog::new(catalog()));

    let primary = AssessmentService::new(
        EligibilityEngine::standard(),
        interleaved.clone(),
        catalog.clone(),
        notifier.clone(),
    );
    let rival = Arc::new(AssessmentService::new(
        EligibilityEngine::standard(),
        Arc::new(storage),
        catalog,
        notifier.clone(),
    ));
    (primary, rival, interleaved, notifier)
}

pub(super) struct UnavailableSessions;

impl SessionRepository for UnavailableSessions {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<CompletionEvent>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<CompletionEvent> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl CompletionNotifier for MemoryNotifier {
    fn assessment_completed(&self, event: CompletionEvent) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct FailingCatalog;

impl ProviderCatalog for FailingCatalog {
    fn providers(&self) -> Result<Vec<Provider>, CatalogError> {
        Err(CatalogError::Unavailable("backend offline".to_string()))
    }
}
