use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::{DEFAULT_CODE_LENGTH, generate_survey_code};
use crate::credential::PasswordCredential;

use super::question::{Question, QuestionAnswers};

/// A survey document: the unit the store persists, keyed by `survey_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    title: String,
    credential: PasswordCredential,
    survey_code: String,
    #[serde(default)]
    is_public: bool,
    #[serde(rename = "survey", default)]
    questions: Vec<QuestionAnswers>,
    created_at: DateTime<Utc>,
}

impl Survey {
    #[must_use]
    pub fn new(title: impl Into<String>, password: &str) -> Self {
        Self {
            title: title.into(),
            credential: PasswordCredential::hash(password),
            survey_code: generate_survey_code(DEFAULT_CODE_LENGTH),
            is_public: false,
            questions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_questions<I>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = Question>,
    {
        self.questions = questions.into_iter().map(QuestionAnswers::new).collect();
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn survey_code(&self) -> &str {
        &self.survey_code
    }

    /// Override the generated code. Only meaningful before the survey is persisted.
    pub fn set_survey_code(&mut self, code: impl Into<String>) {
        self.survey_code = code.into();
    }

    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.credential.verify(password)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionAnswers] {
        &self.questions
    }

    pub fn question_mut(&mut self, question_id: &str) -> Option<&mut QuestionAnswers> {
        self.questions
            .iter_mut()
            .find(|pair| pair.question.id == question_id)
    }

    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&QuestionAnswers> {
        self.questions
            .iter()
            .find(|pair| pair.question.id == question_id)
    }

    /// Largest number of answers recorded for any single question.
    #[must_use]
    pub fn response_count(&self) -> usize {
        self.questions
            .iter()
            .map(|pair| pair.answers.len())
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn summary(&self) -> SurveySummary {
        SurveySummary {
            title: self.title.clone(),
            survey_code: self.survey_code.clone(),
            is_public: self.is_public,
            question_count: self.questions.len(),
            response_count: self.response_count(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub title: String,
    pub survey_code: String,
    pub is_public: bool,
    pub question_count: usize,
    pub response_count: usize,
    pub created_at: DateTime<Utc>,
}
