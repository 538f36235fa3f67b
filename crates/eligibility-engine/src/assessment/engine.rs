use std::sync::{Arc, OnceLock};

use super::domain::{EligibilityResult, Provider, Responses};
use super::matching::{recommend_providers, DEFAULT_RECOMMENDATION_LIMIT};
use super::questionnaire::{
    Questionnaire, QuestionnaireError, CONDITION_QUESTION, LOCATION_QUESTION,
};
use super::scoring::{self, classify, ScoreCard};
use super::specialties::SpecialtyMap;

/// Stateless engine composing scoring, classification, and provider matching.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    questionnaire: Arc<Questionnaire>,
    specialties: Arc<SpecialtyMap>,
    recommendation_limit: usize,
}

impl EligibilityEngine {
    pub fn standard() -> Self {
        Self {
            questionnaire: Arc::new(Questionnaire::standard()),
            specialties: Arc::new(SpecialtyMap::standard()),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Build an engine from custom tables. Every condition option must be mapped.
    pub fn new(
        questionnaire: Questionnaire,
        specialties: SpecialtyMap,
    ) -> Result<Self, QuestionnaireError> {
        if let Some(unmapped) = questionnaire
            .condition_values()
            .find(|condition| !specialties.contains(condition))
        {
            return Err(QuestionnaireError::UnmappedCondition(unmapped.to_string()));
        }

        Ok(Self {
            questionnaire: Arc::new(questionnaire),
            specialties: Arc::new(specialties),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        })
    }

    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn specialties(&self) -> &SpecialtyMap {
        &self.specialties
    }

    pub fn recommendation_limit(&self) -> usize {
        self.recommendation_limit
    }

    pub fn score(&self, responses: &Responses) -> ScoreCard {
        scoring::score(&self.questionnaire, responses)
    }

    pub fn recommend(&self, condition: &str, providers: &[Provider]) -> Vec<Provider> {
        recommend_providers(
            &self.specialties,
            condition,
            providers,
            self.recommendation_limit,
        )
    }

    pub fn assess(&self, responses: &Responses, providers: &[Provider]) -> EligibilityResult {
        let card = self.score(responses);
        let classification = classify(card.total);
        let condition = responses.get(CONDITION_QUESTION).unwrap_or_default();
        let location = responses.get(LOCATION_QUESTION).unwrap_or_default();

        EligibilityResult {
            tier: classification.tier,
            confidence_percent: classification.confidence_percent,
            factors: card.factors(),
            condition: condition.to_string(),
            recommended_providers: self.recommend(condition, providers),
            location: location.to_string(),
        }
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Assess against the standard questionnaire and specialty map.
pub fn assess(responses: &Responses, providers: &[Provider]) -> EligibilityResult {
    static STANDARD: OnceLock<EligibilityEngine> = OnceLock::new();
    STANDARD
        .get_or_init(EligibilityEngine::standard)
        .assess(responses, providers)
}
