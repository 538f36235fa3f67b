use super::super::domain::{Question, Responses};
use super::super::questionnaire::Questionnaire;
use super::{ScoreCard, ScoreComponent};

pub(crate) fn score_responses(questionnaire: &Questionnaire, responses: &Responses) -> ScoreCard {
    let components: Vec<ScoreComponent> = questionnaire
        .questions()
        .iter()
        .filter_map(|question| question_contribution(question, responses))
        .collect();

    let total = components
        .iter()
        .map(|component| i32::from(component.points))
        .sum();

    ScoreCard { total, components }
}

/// Contribution of one question, independent of every other answer.
/// Unanswered questions and unknown option values contribute nothing.
pub(crate) fn question_contribution(
    question: &Question,
    responses: &Responses,
) -> Option<ScoreComponent> {
    let value = responses.get(&question.id)?;
    let option = question.option(value)?;

    Some(ScoreComponent {
        question: question.id.clone(),
        value: option.value.clone(),
        points: option.weight,
        factor: option.factor.clone(),
    })
}
