use crate::infra::{CheckerCounter, InMemorySessionRepository};
use clap::Args;
use eligibility_engine::assessment::{
    AssessmentService, AssessmentServiceError, EligibilityEngine, EligibilityResult, Provider,
    Questionnaire, Responses, SessionId,
};
use eligibility_engine::catalog::{embedded_providers, ProviderCsvImporter, StaticCatalog};
use eligibility_engine::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Answer as question=value; repeat for each question
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Provider CSV export to match against (defaults to the embedded dataset)
    #[arg(long)]
    pub(crate) providers: Option<PathBuf>,
    /// Maximum number of recommended providers
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (question, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question=value, got '{raw}'"))?;
    let question = question.trim();
    let value = value.trim();
    if question.is_empty() || value.is_empty() {
        return Err(format!("expected question=value, got '{raw}'"));
    }
    Ok((question.to_string(), value.to_string()))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        answers,
        providers,
        limit,
        json,
    } = args;

    let mut engine = EligibilityEngine::standard();
    if let Some(limit) = limit {
        engine = engine.with_recommendation_limit(limit);
    }

    let responses = collect_responses(engine.questionnaire(), answers)?;
    let providers = match providers {
        Some(path) => ProviderCsvImporter::from_path(path)?,
        None => embedded_providers(),
    };

    let result = engine.assess(&responses, &providers);
    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Result payload unavailable: {}", err),
        }
        return Ok(());
    }

    let missing = engine.questionnaire().unanswered(&responses);
    if !missing.is_empty() {
        println!("Unanswered (scored as 0): {}", missing.join(", "));
    }
    render_result(&result);
    Ok(())
}

/// Validate CLI answers against the questionnaire the way the session flow does.
fn collect_responses(
    questionnaire: &Questionnaire,
    answers: Vec<(String, String)>,
) -> Result<Responses, AssessmentServiceError> {
    let mut responses = Responses::new();
    for (question, value) in answers {
        let known = questionnaire
            .question(&question)
            .ok_or_else(|| AssessmentServiceError::UnknownQuestion(question.clone()))?;
        if known.option(&value).is_none() {
            return Err(AssessmentServiceError::UnknownOption { question, value });
        }
        responses.answer(question, value);
    }
    Ok(responses)
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let questionnaire = Questionnaire::standard();
    for question in questionnaire.questions() {
        println!("{} - {}", question.id, question.prompt);
        for option in &question.options {
            println!(
                "  - {:<18} {:>3} pts  {}",
                option.value, option.weight, option.label
            );
        }
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Eligibility assessment demo");

    let checkers = Arc::new(CheckerCounter::default());
    let service = AssessmentService::new(
        EligibilityEngine::standard(),
        Arc::new(InMemorySessionRepository::default()),
        Arc::new(StaticCatalog::embedded()),
        checkers.clone(),
    );

    let scenarios: [(&str, [(&str, &str); 5]); 2] = [
        (
            "Long-standing epilepsy, several treatments tried",
            [
                ("condition", "epilepsy"),
                ("duration", "5-plus-years"),
                ("treatments", "multiple-limited"),
                ("location", "england"),
                ("priority", "pain-relief"),
            ],
        ),
        (
            "Exploring options, nothing disclosed",
            [
                ("condition", "exploring"),
                ("duration", "under-6-months"),
                ("treatments", "prefer-not-say"),
                ("location", "prefer-not-say"),
                ("priority", "all-above"),
            ],
        ),
    ];

    for (title, answers) in scenarios {
        println!("\nScenario: {title}");
        let record = service.start()?;
        let session_id: SessionId = record.session_id;
        for (question, value) in answers {
            service.answer(&session_id, question, value)?;
        }
        let result = service.complete(&session_id)?;
        println!("- Session {session_id}");
        render_result(&result);
    }

    println!("\nChecks completed this run: {}", checkers.completed());
    Ok(())
}

fn render_result(result: &EligibilityResult) {
    println!(
        "{} ({}% confidence, {})",
        result.headline(),
        result.confidence_percent,
        result.tier.label()
    );
    if !result.condition.is_empty() {
        println!("Condition: {}", result.condition);
    }
    if !result.location.is_empty() {
        println!("Location: {}", result.location);
    }
    println!("Factors:");
    for factor in &result.factors {
        println!("  - {factor}");
    }
    if result.recommended_providers.is_empty() {
        println!("Recommended providers: none available");
    } else {
        println!("Recommended providers:");
        for provider in &result.recommended_providers {
            println!("  - {}", describe_provider(provider));
        }
    }
}

fn describe_provider(provider: &Provider) -> String {
    let mut line = format!("{} [{}]", provider.name, provider.specialties.join(", "));
    if provider.rating > 0.0 {
        line.push_str(&format!(" | rating {:.1}", provider.rating));
    }
    if let Some(price) = provider.price_from {
        line.push_str(&format!(" | from £{price}"));
    }
    if !provider.wait_time.is_empty() {
        line.push_str(&format!(" | wait {}", provider.wait_time));
    }
    line
}
