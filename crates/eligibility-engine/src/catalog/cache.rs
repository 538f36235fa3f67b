use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::{embedded_providers, CatalogError, CatalogSource, ProviderCatalog, ProviderFetcher};
use crate::assessment::Provider;

pub const DEFAULT_FRESHNESS_SECS: u64 = 300;

/// Provider list together with where it was served from.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRead {
    pub providers: Vec<Provider>,
    pub source: CatalogSource,
}

struct CacheEntry {
    providers: Vec<Provider>,
    fetched_at: DateTime<Utc>,
}

/// Freshness-windowed cache over a [`ProviderFetcher`].
///
/// Inside the window the cached list is served. Past it a refetch is attempted;
/// on failure the last good list is served, and with no list ever fetched the
/// embedded default dataset is served.
pub struct CachedProviderCatalog<F> {
    fetcher: F,
    freshness: Duration,
    embedded: Vec<Provider>,
    state: Mutex<Option<CacheEntry>>,
}

impl<F: ProviderFetcher> CachedProviderCatalog<F> {
    pub fn new(fetcher: F, freshness: Duration) -> Self {
        Self {
            fetcher,
            freshness,
            embedded: embedded_providers(),
            state: Mutex::new(None),
        }
    }

    pub fn with_embedded(mut self, providers: Vec<Provider>) -> Self {
        self.embedded = providers;
        self
    }

    pub fn read(&self) -> CatalogRead {
        self.read_at(Utc::now())
    }

    /// The cache lock is not held while the fetcher runs.
    pub fn read_at(&self, now: DateTime<Utc>) -> CatalogRead {
        if let Some(entry) = self.lock().as_ref() {
            if now.signed_duration_since(entry.fetched_at) < self.freshness {
                return CatalogRead {
                    providers: entry.providers.clone(),
                    source: CatalogSource::Cached,
                };
            }
        }

        let fetched = self.fetcher.fetch();

        let mut state = self.lock();
        match fetched {
            Ok(providers) => {
                debug!(count = providers.len(), "provider catalog refreshed");
                let newer = state
                    .as_ref()
                    .map_or(true, |entry| entry.fetched_at <= now);
                if newer {
                    *state = Some(CacheEntry {
                        providers: providers.clone(),
                        fetched_at: now,
                    });
                }
                CatalogRead {
                    providers,
                    source: CatalogSource::Fresh,
                }
            }
            Err(err) => match state.as_ref() {
                Some(entry) => {
                    let age_secs = now.signed_duration_since(entry.fetched_at).num_seconds();
                    warn!(error = %err, age_secs, "serving stale provider catalog");
                    CatalogRead {
                        providers: entry.providers.clone(),
                        source: CatalogSource::Stale,
                    }
                }
                None => {
                    warn!(error = %err, "provider catalog unavailable, serving embedded defaults");
                    CatalogRead {
                        providers: self.embedded.clone(),
                        source: CatalogSource::Embedded,
                    }
                }
            },
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: ProviderFetcher> ProviderCatalog for CachedProviderCatalog<F> {
    fn providers(&self) -> Result<Vec<Provider>, CatalogError> {
        Ok(self.read().providers)
    }
}
