use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::{CatalogError, ProviderFetcher};
use crate::assessment::Provider;

/// Parses provider exports with the columns
/// `id,name,specialties,rating,price_from,wait_time,booking_url`.
/// Specialties are `;`-separated free text.
pub struct ProviderCsvImporter;

impl ProviderCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Provider>, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Provider>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut providers = Vec::new();

        for record in csv_reader.deserialize::<ProviderRow>() {
            providers.push(record?.into_provider());
        }

        Ok(providers)
    }
}

/// Fetcher that re-reads a CSV export on every refresh.
#[derive(Debug, Clone)]
pub struct CsvProviderFetcher {
    path: PathBuf,
}

impl CsvProviderFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProviderFetcher for CsvProviderFetcher {
    fn fetch(&self) -> Result<Vec<Provider>, CatalogError> {
        ProviderCsvImporter::from_path(&self.path)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderRow {
    id: String,
    name: String,
    #[serde(default)]
    specialties: String,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    price_from: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    wait_time: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    booking_url: Option<String>,
}

impl ProviderRow {
    fn into_provider(self) -> Provider {
        let specialties = self
            .specialties
            .split(';')
            .map(str::trim)
            .filter(|specialty| !specialty.is_empty())
            .map(str::to_string)
            .collect();

        Provider {
            id: self.id,
            name: self.name,
            specialties,
            rating: self.rating.unwrap_or_default(),
            price_from: self.price_from,
            wait_time: self.wait_time.unwrap_or_default(),
            booking_url: self.booking_url.unwrap_or_default(),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "id,name,specialties,rating,price_from,wait_time,booking_url\n\
        p-1,Northway Clinic,Chronic Pain Management; Neurology,4.8,150,2-3 days,https://example.com/northway\n\
        p-2,Calm Minds,,4.1,,,\n";

    #[test]
    fn parses_specialty_lists_and_optional_columns() {
        let providers = ProviderCsvImporter::from_reader(EXPORT.as_bytes()).expect("csv parses");

        assert_eq!(providers.len(), 2);
        assert_eq!(
            providers[0].specialties,
            vec!["Chronic Pain Management".to_string(), "Neurology".to_string()]
        );
        assert_eq!(providers[0].price_from, Some(150));
        assert!(providers[1].specialties.is_empty());
        assert_eq!(providers[1].price_from, None);
        assert_eq!(providers[1].booking_url, "");
    }

    #[test]
    fn rejects_malformed_ratings() {
        let export = "id,name,specialties,rating\np-1,Northway,Pain,excellent\n";
        let err = ProviderCsvImporter::from_reader(export.as_bytes()).expect_err("bad rating");
        assert!(matches!(err, CatalogError::Csv(_)));
    }

    #[test]
    fn fetcher_reports_missing_files() {
        let fetcher = CsvProviderFetcher::new("/nonexistent/providers.csv");
        let err = fetcher.fetch().expect_err("missing file");
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
