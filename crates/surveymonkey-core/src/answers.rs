//! Appending respondent answers to a survey's answer collections.

use crate::error::{Result, SurveyError};
use crate::models::{QuestionKind, StoredAnswer, Survey};

/// Append every answer to the question it names.
///
/// All answers are checked before any is appended, so a submission is
/// recorded entirely or not at all. Returns the number of answers recorded.
pub fn apply_answers(survey: &mut Survey, answers: &[StoredAnswer], strict: bool) -> Result<usize> {
    for answer in answers {
        let Some(pair) = survey.question(&answer.question_id) else {
            return Err(SurveyError::Validation(format!(
                "survey {} has no question with id {}",
                survey.survey_code(),
                answer.question_id
            )));
        };
        if strict {
            validate_answer(&pair.question.kind, &answer.answer)?;
        }
    }

    for answer in answers {
        if let Some(pair) = survey.question_mut(&answer.question_id) {
            pair.push_answer(answer.answer.clone());
        }
    }
    Ok(answers.len())
}

pub fn validate_answer(kind: &QuestionKind, value: &str) -> Result<()> {
    match kind {
        QuestionKind::OpenEnded => Ok(()),
        QuestionKind::Histogram {
            min_value,
            max_value,
            ..
        } => {
            let parsed = value.trim().parse::<f64>().map_err(|_| {
                SurveyError::Validation(format!("histogram answer is not a number: {value}"))
            })?;
            if !parsed.is_finite() || parsed < *min_value || parsed > *max_value {
                return Err(SurveyError::Validation(format!(
                    "histogram answer {parsed} outside [{min_value}, {max_value}]"
                )));
            }
            Ok(())
        }
        QuestionKind::MultipleChoice { choices } => {
            if choices.iter().any(|choice| choice == value.trim()) {
                Ok(())
            } else {
                Err(SurveyError::Validation(format!(
                    "answer is not one of the offered choices: {value}"
                )))
            }
        }
    }
}
