use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::generate_question_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum QuestionKind {
    OpenEnded,
    Histogram {
        min_value: f64,
        max_value: f64,
        step_size: f64,
    },
    #[serde(rename = "OPTION")]
    MultipleChoice { choices: Vec<String> },
}

impl QuestionKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenEnded => "open-ended",
            Self::Histogram { .. } => "histogram",
            Self::MultipleChoice { .. } => "option",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: generate_question_id(),
            prompt: prompt.into(),
            kind,
        }
    }

    #[must_use]
    pub fn open_ended(prompt: impl Into<String>) -> Self {
        Self::new(prompt, QuestionKind::OpenEnded)
    }

    #[must_use]
    pub fn histogram(prompt: impl Into<String>, min_value: f64, max_value: f64, step_size: f64) -> Self {
        Self::new(
            prompt,
            QuestionKind::Histogram {
                min_value,
                max_value,
                step_size,
            },
        )
    }

    #[must_use]
    pub fn multiple_choice<I, S>(prompt: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            prompt,
            QuestionKind::MultipleChoice {
                choices: choices.into_iter().map(Into::into).collect(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub value: String,
    pub submitted_at: DateTime<Utc>,
}

/// One question and every answer submitted for it, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswers {
    pub question: Question,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl QuestionAnswers {
    #[must_use]
    pub const fn new(question: Question) -> Self {
        Self {
            question,
            answers: Vec::new(),
        }
    }

    pub fn push_answer(&mut self, value: impl Into<String>) {
        self.answers.push(Answer {
            value: value.into(),
            submitted_at: Utc::now(),
        });
    }

    pub fn answer_values(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(|answer| answer.value.as_str())
    }
}

impl From<Question> for QuestionAnswers {
    fn from(question: Question) -> Self {
        Self::new(question)
    }
}
