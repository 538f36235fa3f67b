use chrono::Duration;
use eligibility_engine::assessment::{
    CompletionEvent, CompletionNotifier, EligibilityEngine, NotifyError, Questionnaire,
    RepositoryError, SessionId, SessionRecord, SessionRepository, SpecialtyMap,
};
use eligibility_engine::catalog::{
    CachedProviderCatalog, CsvProviderFetcher, ProviderCatalog, StaticCatalog,
};
use eligibility_engine::config::{AssessmentConfig, CatalogConfig};
use eligibility_engine::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

const MAX_FRESHNESS_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) checkers: Arc<CheckerCounter>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, SessionRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, mut record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
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
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

/// Display counter of completed eligibility checks, offset by a configured base.
#[derive(Debug, Default)]
pub(crate) struct CheckerCounter {
    base: u64,
    completed: AtomicU64,
}

impl CheckerCounter {
    pub(crate) fn new(base: u64) -> Self {
        Self {
            base,
            completed: AtomicU64::new(0),
        }
    }

    pub(crate) fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub(crate) fn total(&self) -> u64 {
        self.base.saturating_add(self.completed())
    }
}

impl CompletionNotifier for CheckerCounter {
    fn assessment_completed(&self, _event: CompletionEvent) -> Result<(), NotifyError> {
        self.completed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

pub(crate) fn build_engine(config: &AssessmentConfig) -> Result<EligibilityEngine, AppError> {
    let engine = match &config.rules_path {
        Some(path) => {
            let questionnaire = Questionnaire::from_path(path)?;
            info!(path = %path.display(), "loaded assessment rules");
            EligibilityEngine::new(questionnaire, SpecialtyMap::standard())?
        }
        None => EligibilityEngine::standard(),
    };
    Ok(engine.with_recommendation_limit(config.recommendation_limit))
}

pub(crate) fn build_catalog(config: &CatalogConfig) -> Arc<dyn ProviderCatalog> {
    match &config.path {
        Some(path) => {
            let secs = config.freshness_secs.min(MAX_FRESHNESS_SECS) as i64;
            info!(
                path = %path.display(),
                freshness_secs = secs,
                "provider catalog backed by csv export"
            );
            Arc::new(CachedProviderCatalog::new(
                CsvProviderFetcher::new(path.clone()),
                Duration::seconds(secs),
            ))
        }
        None => {
            info!("provider catalog using embedded dataset");
            Arc::new(StaticCatalog::embedded())
        }
    }
}
