use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AnswerOption, Question, Responses};

pub const CONDITION_QUESTION: &str = "condition";
pub const DURATION_QUESTION: &str = "duration";
pub const TREATMENTS_QUESTION: &str = "treatments";
pub const LOCATION_QUESTION: &str = "location";
pub const PRIORITY_QUESTION: &str = "priority";

/// Errors raised while loading or validating a questionnaire.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("questionnaire defines no questions")]
    Empty,
    #[error("question '{0}' is defined more than once")]
    DuplicateQuestion(String),
    #[error("question '{question}' defines option '{value}' more than once")]
    DuplicateOption { question: String, value: String },
    #[error("questionnaire is missing the 'condition' question")]
    MissingConditionQuestion,
    #[error("condition '{0}' has no specialty mapping")]
    UnmappedCondition(String),
    #[error("failed to read questionnaire: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid questionnaire JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered question set with per-option weights and factor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn standard() -> Self {
        Self {
            questions: STANDARD_QUESTIONS.iter().map(QuestionSeed::build).collect(),
        }
    }

    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::Empty);
        }

        let mut seen_questions = HashSet::new();
        for question in &questions {
            if !seen_questions.insert(question.id.as_str()) {
                return Err(QuestionnaireError::DuplicateQuestion(question.id.clone()));
            }

            let mut seen_options = HashSet::new();
            for option in &question.options {
                if !seen_options.insert(option.value.as_str()) {
                    return Err(QuestionnaireError::DuplicateOption {
                        question: question.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }

        if !seen_questions.contains(CONDITION_QUESTION) {
            return Err(QuestionnaireError::MissingConditionQuestion);
        }

        Ok(Self { questions })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuestionnaireError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a JSON document of the shape `{"questions": [...]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionnaireError> {
        let parsed: Questionnaire = serde_json::from_reader(reader)?;
        Self::new(parsed.questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn option(&self, question: &str, value: &str) -> Option<&AnswerOption> {
        self.question(question)
            .and_then(|question| question.option(value))
    }

    pub fn condition_values(&self) -> impl Iterator<Item = &str> {
        self.question(CONDITION_QUESTION)
            .into_iter()
            .flat_map(|question| question.options.iter())
            .map(|option| option.value.as_str())
    }

    /// Question ids that have no answer yet, in question order.
    pub fn unanswered(&self, responses: &Responses) -> Vec<String> {
        self.questions
            .iter()
            .filter(|question| !responses.contains(&question.id))
            .map(|question| question.id.clone())
            .collect()
    }
}

struct OptionSeed {
    value: &'static str,
    label: &'static str,
    weight: u16,
    factor: &'static str,
}

struct QuestionSeed {
    id: &'static str,
    prompt: &'static str,
    options: &'static [OptionSeed],
}

impl QuestionSeed {
    fn build(&self) -> Question {
        Question {
            id: self.id.to_string(),
            prompt: self.prompt.to_string(),
            options: self
                .options
                .iter()
                .map(|seed| AnswerOption {
                    value: seed.value.to_string(),
                    label: seed.label.to_string(),
                    weight: seed.weight,
                    factor: seed.factor.to_string(),
                })
                .collect(),
        }
    }
}

const ADDITIONAL_INFORMATION: &str = "Additional information may be required";

const STANDARD_QUESTIONS: &[QuestionSeed] = &[
    QuestionSeed {
        id: CONDITION_QUESTION,
        prompt: "Which condition are you primarily seeking treatment for?",
        options: &[
            OptionSeed {
                value: "chronic-pain",
                label: "Chronic pain",
                weight: 30,
                factor: "Chronic pain is one of the most frequently treated conditions",
            },
            OptionSeed {
                value: "epilepsy",
                label: "Epilepsy",
                weight: 30,
                factor: "Epilepsy has an established record of specialist-led treatment",
            },
            OptionSeed {
                value: "multiple-sclerosis",
                label: "Multiple sclerosis",
                weight: 30,
                factor: "Multiple sclerosis symptoms are a recognised treatment area",
            },
            OptionSeed {
                value: "anxiety",
                label: "Anxiety",
                weight: 20,
                factor: "Anxiety disorders are regularly assessed by specialist clinics",
            },
            OptionSeed {
                value: "ptsd",
                label: "PTSD",
                weight: 20,
                factor: "PTSD is considered by specialists on a case-by-case basis",
            },
            OptionSeed {
                value: "insomnia",
                label: "Insomnia",
                weight: 20,
                factor: "Sleep disorders are frequently reviewed by specialist clinics",
            },
            OptionSeed {
                value: "other",
                label: "Another condition",
                weight: 10,
                factor: "Other conditions may be considered following specialist review",
            },
            OptionSeed {
                value: "exploring",
                label: "Just exploring my options",
                weight: 10,
                factor: "Exploring your options is a sensible first step towards a consultation",
            },
        ],
    },
    QuestionSeed {
        id: DURATION_QUESTION,
        prompt: "How long have you been living with this condition?",
        options: &[
            OptionSeed {
                value: "under-6-months",
                label: "Less than 6 months",
                weight: 10,
                factor: "Recent conditions usually need more history before treatment is considered",
            },
            OptionSeed {
                value: "6-12-months",
                label: "6 to 12 months",
                weight: 15,
                factor: "A condition lasting several months shows an emerging treatment history",
            },
            OptionSeed {
                value: "1-2-years",
                label: "1 to 2 years",
                weight: 20,
                factor: "A condition lasting over a year indicates an established history",
            },
            OptionSeed {
                value: "2-5-years",
                label: "2 to 5 years",
                weight: 25,
                factor: "A long-standing condition strengthens the case for specialist treatment",
            },
            OptionSeed {
                value: "5-plus-years",
                label: "More than 5 years",
                weight: 25,
                factor: "A long-standing condition strengthens the case for specialist treatment",
            },
            OptionSeed {
                value: "lifelong",
                label: "Lifelong",
                weight: 25,
                factor: "A lifelong condition strengthens the case for specialist treatment",
            },
        ],
    },
    QuestionSeed {
        id: TREATMENTS_QUESTION,
        prompt: "Which best describes the treatments you have tried so far?",
        options: &[
            OptionSeed {
                value: "multiple-limited",
                label: "Several treatments with limited success",
                weight: 30,
                factor: "Trying two or more conventional treatments without adequate relief is a key criterion",
            },
            OptionSeed {
                value: "one-limited",
                label: "One treatment with limited success",
                weight: 25,
                factor: "Trying a conventional treatment without adequate relief supports eligibility",
            },
            OptionSeed {
                value: "some-relief",
                label: "Current treatment gives some relief",
                weight: 20,
                factor: "Partial relief from existing treatment may still warrant specialist review",
            },
            OptionSeed {
                value: "none",
                label: "I have not tried any treatments",
                weight: 15,
                factor: "Specialists usually expect conventional treatments to be tried first",
            },
            OptionSeed {
                value: "prefer-not-say",
                label: "Prefer not to say",
                weight: 15,
                factor: ADDITIONAL_INFORMATION,
            },
        ],
    },
    QuestionSeed {
        id: LOCATION_QUESTION,
        prompt: "Where in the UK are you based?",
        options: &[
            OptionSeed {
                value: "england",
                label: "England",
                weight: 10,
                factor: "Specialist clinics are available to patients in England",
            },
            OptionSeed {
                value: "scotland",
                label: "Scotland",
                weight: 10,
                factor: "Specialist clinics are available to patients in Scotland",
            },
            OptionSeed {
                value: "wales",
                label: "Wales",
                weight: 10,
                factor: "Specialist clinics are available to patients in Wales",
            },
            OptionSeed {
                value: "northern-ireland",
                label: "Northern Ireland",
                weight: 10,
                factor: "Specialist clinics are available to patients in Northern Ireland",
            },
            OptionSeed {
                value: "prefer-not-say",
                label: "Prefer not to say",
                weight: 0,
                factor: ADDITIONAL_INFORMATION,
            },
        ],
    },
    QuestionSeed {
        id: PRIORITY_QUESTION,
        prompt: "What matters most to you from treatment?",
        options: &[
            OptionSeed {
                value: "pain-relief",
                label: "Pain relief",
                weight: 5,
                factor: "Pain relief is a common and well understood treatment goal",
            },
            OptionSeed {
                value: "better-sleep",
                label: "Better sleep",
                weight: 5,
                factor: "Improved sleep is a common treatment goal",
            },
            OptionSeed {
                value: "reduced-anxiety",
                label: "Reduced anxiety",
                weight: 5,
                factor: "Reducing anxiety is a common treatment goal",
            },
            OptionSeed {
                value: "quality-of-life",
                label: "Overall quality of life",
                weight: 5,
                factor: "Quality of life improvements are central to specialist care plans",
            },
            OptionSeed {
                value: "all-above",
                label: "All of the above",
                weight: 5,
                factor: "Broad treatment goals can be discussed during your consultation",
            },
            OptionSeed {
                value: "prefer-not-say",
                label: "Prefer not to say",
                weight: 0,
                factor: ADDITIONAL_INFORMATION,
            },
        ],
    },
];
