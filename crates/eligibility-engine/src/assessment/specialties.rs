use std::collections::BTreeMap;

/// Condition value to lowercase specialty search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl SpecialtyMap {
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_SPECIALTIES.iter().map(|(condition, terms)| {
            (
                condition.to_string(),
                terms.iter().map(|term| term.to_string()).collect(),
            )
        }))
    }

    /// Build a map, normalizing every term to lowercase.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let entries = entries
            .into_iter()
            .map(|(condition, terms)| {
                let terms = terms
                    .into_iter()
                    .map(|term| term.trim().to_lowercase())
                    .filter(|term| !term.is_empty())
                    .collect();
                (condition, terms)
            })
            .collect();

        Self { entries }
    }

    /// Search terms for a condition. Unknown and catch-all conditions yield no terms.
    pub fn terms_for(&self, condition: &str) -> &[String] {
        self.entries
            .get(condition)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, condition: &str) -> bool {
        self.entries.contains_key(condition)
    }

    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

const STANDARD_SPECIALTIES: &[(&str, &[&str])] = &[
    ("chronic-pain", &["chronic pain", "pain management"]),
    ("epilepsy", &["epilepsy", "neurology"]),
    ("multiple-sclerosis", &["multiple sclerosis", "neurology"]),
    ("anxiety", &["anxiety", "mental health"]),
    ("ptsd", &["ptsd", "trauma", "mental health"]),
    ("insomnia", &["insomnia", "sleep"]),
    ("other", &[]),
    ("exploring", &[]),
];
