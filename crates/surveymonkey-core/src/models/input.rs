use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};

use super::question::{Question, QuestionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    OpenEnded,
    Histogram,
    Option,
}

/// One question as submitted by the survey creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub min_val: Option<f64>,
    #[serde(default)]
    pub max_val: Option<f64>,
    #[serde(default)]
    pub step_size: Option<f64>,
    #[serde(default)]
    pub choices: Vec<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn open_ended(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            question_type: QuestionType::OpenEnded,
            min_val: None,
            max_val: None,
            step_size: None,
            choices: Vec::new(),
        }
    }

    pub fn into_question(self) -> Result<Question> {
        let prompt = self.question.trim().to_string();
        if prompt.is_empty() {
            return Err(SurveyError::Validation(
                "question text must not be empty".to_string(),
            ));
        }
        let kind = match self.question_type {
            QuestionType::OpenEnded => QuestionKind::OpenEnded,
            QuestionType::Histogram => {
                let min_value = self.min_val.unwrap_or(0.0);
                let Some(max_value) = self.max_val else {
                    return Err(SurveyError::Validation(format!(
                        "histogram question requires maxVal: {prompt}"
                    )));
                };
                let step_size = self.step_size.unwrap_or(1.0);
                if !(min_value.is_finite() && max_value.is_finite() && min_value < max_value) {
                    return Err(SurveyError::Validation(format!(
                        "histogram range must satisfy minVal < maxVal: {prompt}"
                    )));
                }
                if !(step_size.is_finite() && step_size > 0.0) {
                    return Err(SurveyError::Validation(format!(
                        "histogram stepSize must be positive: {prompt}"
                    )));
                }
                QuestionKind::Histogram {
                    min_value,
                    max_value,
                    step_size,
                }
            }
            QuestionType::Option => {
                let choices: Vec<String> = self
                    .choices
                    .into_iter()
                    .map(|choice| choice.trim().to_string())
                    .filter(|choice| !choice.is_empty())
                    .collect();
                if choices.is_empty() {
                    return Err(SurveyError::Validation(format!(
                        "option question requires at least one choice: {prompt}"
                    )));
                }
                QuestionKind::MultipleChoice { choices }
            }
        };
        Ok(Question::new(prompt, kind))
    }
}

/// Body of the survey creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSurvey {
    pub title: String,
    pub password: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnswer {
    pub question_id: String,
    pub answer: String,
}

/// A respondent's answers for one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub survey_code: String,
    #[serde(alias = "answeredStored", default)]
    pub answers: Vec<StoredAnswer>,
}
