use super::domain::Provider;
use super::specialties::SpecialtyMap;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Providers serving `condition`, in catalog order and bounded by `limit`.
///
/// When no provider matches, the first `limit` catalog entries are returned so
/// the recommendation is never empty while the catalog itself is not.
pub fn recommend_providers(
    specialties: &SpecialtyMap,
    condition: &str,
    providers: &[Provider],
    limit: usize,
) -> Vec<Provider> {
    let terms = specialties.terms_for(condition);
    let matched = matching_providers(terms, providers, limit);

    if matched.is_empty() {
        return providers.iter().take(limit).cloned().collect();
    }

    matched
}

/// Candidates whose free-text specialties contain any term, case-insensitively.
pub fn matching_providers(terms: &[String], providers: &[Provider], limit: usize) -> Vec<Provider> {
    if terms.is_empty() {
        return Vec::new();
    }

    providers
        .iter()
        .filter(|provider| serves_any(provider, terms))
        .take(limit)
        .cloned()
        .collect()
}

fn serves_any(provider: &Provider, terms: &[String]) -> bool {
    provider.specialties.iter().any(|specialty| {
        let specialty = specialty.to_lowercase();
        terms
            .iter()
            .any(|term| specialty.contains(term.to_lowercase().as_str()))
    })
}
