//! Provider catalog sourcing: CSV exports, the embedded default dataset, and a
//! freshness-windowed cache that degrades to stale or embedded data on fetch failure.

mod cache;
mod embedded;
mod import;

pub use cache::{CachedProviderCatalog, CatalogRead, DEFAULT_FRESHNESS_SECS};
pub use embedded::embedded_providers;
pub use import::{CsvProviderFetcher, ProviderCsvImporter};

use crate::assessment::Provider;
use serde::Serialize;

/// Read side of the provider catalog consumed by the assessment service.
pub trait ProviderCatalog: Send + Sync {
    fn providers(&self) -> Result<Vec<Provider>, CatalogError>;
}

/// Upstream read of the provider list (hosted backend, file export, ...).
pub trait ProviderFetcher: Send + Sync {
    fn fetch(&self) -> Result<Vec<Provider>, CatalogError>;
}

impl<F> ProviderFetcher for F
where
    F: Fn() -> Result<Vec<Provider>, CatalogError> + Send + Sync,
{
    fn fetch(&self) -> Result<Vec<Provider>, CatalogError> {
        self()
    }
}

/// Where a catalog read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Fresh,
    Cached,
    Stale,
    Embedded,
}

/// Fixed provider list, used for the embedded dataset and CLI-supplied exports.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    providers: Vec<Provider>,
}

impl StaticCatalog {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn embedded() -> Self {
        Self::new(embedded_providers())
    }
}

impl ProviderCatalog for StaticCatalog {
    fn providers(&self) -> Result<Vec<Provider>, CatalogError> {
        Ok(self.providers.clone())
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Unavailable(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read provider export: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid provider CSV data: {}", err),
            CatalogError::Unavailable(reason) => {
                write!(f, "provider catalog unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
