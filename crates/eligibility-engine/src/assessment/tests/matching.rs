use super::common::*;
use crate::assessment::{
    matching_providers, recommend_providers, EligibilityEngine, Questionnaire,
    QuestionnaireError, SpecialtyMap, DEFAULT_RECOMMENDATION_LIMIT,
};

fn ids(providers: &[crate::assessment::Provider]) -> Vec<&str> {
    providers.iter().map(|provider| provider.id.as_str()).collect()
}

#[test]
fn unmapped_condition_falls_back_to_catalog_head() {
    let specialties = SpecialtyMap::standard();
    let providers = catalog();

    let recommended = recommend_providers(&specialties, "exploring", &providers, 3);

    assert_eq!(recommended, providers[..3].to_vec());
}

#[test]
fn unknown_condition_also_falls_back() {
    let specialties = SpecialtyMap::standard();
    let recommended = recommend_providers(&specialties, "hay-fever", &catalog(), 2);

    assert_eq!(ids(&recommended), vec!["general", "calm"]);
}

#[test]
fn substring_match_targets_free_text_specialties() {
    let specialties = SpecialtyMap::standard();
    let recommended = recommend_providers(&specialties, "chronic-pain", &catalog(), 3);

    assert_eq!(ids(&recommended), vec!["northway"]);
}

#[test]
fn matches_keep_catalog_order_and_precede_non_matches() {
    let specialties = SpecialtyMap::standard();
    let mut providers = catalog();
    providers.push(provider("second-neuro", &["Paediatric NEUROLOGY"]));

    let recommended = recommend_providers(&specialties, "epilepsy", &providers, 3);

    assert_eq!(ids(&recommended), vec!["neuro", "second-neuro"]);
}

#[test]
fn matches_are_truncated_to_limit() {
    let providers = vec![
        provider("a", &["Anxiety"]),
        provider("b", &["Mental Health"]),
        provider("c", &["Anxiety Clinic"]),
        provider("d", &["anxiety"]),
    ];

    let recommended =
        recommend_providers(&SpecialtyMap::standard(), "anxiety", &providers, 3);

    assert_eq!(ids(&recommended), vec!["a", "b", "c"]);
}

#[test]
fn fallback_returns_whole_catalog_when_smaller_than_limit() {
    let providers = vec![provider("only", &["Dermatology"])];
    let recommended =
        recommend_providers(&SpecialtyMap::standard(), "insomnia", &providers, 3);

    assert_eq!(ids(&recommended), vec!["only"]);
}

#[test]
fn empty_catalog_yields_empty_recommendations() {
    let recommended = recommend_providers(&SpecialtyMap::standard(), "epilepsy", &[], 3);
    assert!(recommended.is_empty());
}

#[test]
fn empty_terms_never_match() {
    assert!(matching_providers(&[], &catalog(), 3).is_empty());
}

#[test]
fn engine_uses_default_limit_of_three() {
    let engine = EligibilityEngine::standard();
    assert_eq!(engine.recommendation_limit(), DEFAULT_RECOMMENDATION_LIMIT);

    let result = engine.assess(&boundary_responses(), &catalog());
    assert_eq!(result.recommended_providers.len(), 3);
}

#[test]
fn engine_respects_configured_limit() {
    let engine = EligibilityEngine::standard().with_recommendation_limit(1);
    let result = engine.assess(&boundary_responses(), &catalog());
    assert_eq!(ids(&result.recommended_providers), vec!["general"]);
}

#[test]
fn engine_rejects_unmapped_condition_options() {
    let specialties = SpecialtyMap::from_entries(vec![(
        "epilepsy".to_string(),
        vec!["epilepsy".to_string()],
    )]);

    let err = EligibilityEngine::new(Questionnaire::standard(), specialties)
        .expect_err("unmapped conditions rejected");

    assert!(matches!(err, QuestionnaireError::UnmappedCondition(_)));
}
