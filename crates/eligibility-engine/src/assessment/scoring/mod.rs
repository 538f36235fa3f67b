mod policy;
mod rules;

pub use policy::{classify, Classification, CONFIDENCE_CEILING, CONFIDENCE_FLOOR};

use super::domain::Responses;
use super::questionnaire::Questionnaire;
use serde::{Deserialize, Serialize};

/// Score the responses against the questionnaire weights.
pub fn score(questionnaire: &Questionnaire, responses: &Responses) -> ScoreCard {
    rules::score_responses(questionnaire, responses)
}

/// Points contributed by a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub question: String,
    pub value: String,
    pub points: u16,
    pub factor: String,
}

/// Composite score with the per-question trail used for factors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total: i32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreCard {
    pub fn factors(&self) -> Vec<String> {
        self.components
            .iter()
            .map(|component| component.factor.clone())
            .collect()
    }
}
