use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single multiple-choice question in the assessment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Selectable answer carrying its score weight and the factor shown to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    pub weight: u16,
    pub factor: String,
}

/// Answers captured during one assessment, keyed by question id.
///
/// Iteration is ordered by question id, not by answer order. Scoring walks the
/// questionnaire, so factors follow question order regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    answers: BTreeMap<String, String>,
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the value it replaced.
    pub fn answer(
        &mut self,
        question: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.answers.insert(question.into(), value.into())
    }

    pub fn with(mut self, question: impl Into<String>, value: impl Into<String>) -> Self {
        self.answer(question, value);
        self
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers.get(question).map(String::as_str)
    }

    pub fn contains(&self, question: &str) -> bool {
        self.answers.contains_key(question)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers
            .iter()
            .map(|(question, value)| (question.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Responses
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(question, value)| (question.into(), value.into()))
                .collect(),
        }
    }
}

/// Discrete eligibility classification, ordered by descending confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    HighlyEligible,
    LikelyEligible,
    PossiblyEligible,
    Unclear,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::HighlyEligible,
        Tier::LikelyEligible,
        Tier::PossiblyEligible,
        Tier::Unclear,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Tier::HighlyEligible => "highly_eligible",
            Tier::LikelyEligible => "likely_eligible",
            Tier::PossiblyEligible => "possibly_eligible",
            Tier::Unclear => "unclear",
        }
    }

    /// Tier-specific message rendered next to the confidence percentage.
    pub const fn headline(self) -> &'static str {
        match self {
            Tier::HighlyEligible => "You are highly likely to be eligible for treatment",
            Tier::LikelyEligible => "You are likely to be eligible for treatment",
            Tier::PossiblyEligible => "You may be eligible for treatment",
            Tier::Unclear => "A specialist consultation is needed to confirm eligibility",
        }
    }
}

/// Provider record supplied by the catalog. Only `specialties` participates in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub specialties: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub price_from: Option<u32>,
    #[serde(default)]
    pub wait_time: String,
    #[serde(default)]
    pub booking_url: String,
}

/// Outcome of a completed assessment handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub tier: Tier,
    pub confidence_percent: u8,
    pub factors: Vec<String>,
    pub condition: String,
    pub recommended_providers: Vec<Provider>,
    pub location: String,
}

impl EligibilityResult {
    pub fn headline(&self) -> &'static str {
        self.tier.headline()
    }
}
