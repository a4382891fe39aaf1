use std::sync::Mutex;

use crate::error::{Result, SurveyError};
use crate::models::Survey;

use super::SurveyStore;

/// Process-local store; documents live in insertion order.
#[derive(Debug, Default)]
pub struct MemorySurveyStore {
    surveys: Mutex<Vec<Survey>>,
}

impl MemorySurveyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_surveys<T>(&self, f: impl FnOnce(&mut Vec<Survey>) -> Result<T>) -> Result<T> {
        let mut surveys = self
            .surveys
            .lock()
            .map_err(|_| SurveyError::mutex_poisoned("survey store"))?;
        f(&mut surveys)
    }
}

impl SurveyStore for MemorySurveyStore {
    fn save(&self, survey: &Survey) -> Result<()> {
        self.with_surveys(|surveys| {
            match surveys
                .iter_mut()
                .find(|existing| existing.survey_code() == survey.survey_code())
            {
                Some(existing) => *existing = survey.clone(),
                None => surveys.push(survey.clone()),
            }
            Ok(())
        })
    }

    fn insert_new(&self, survey: &Survey) -> Result<()> {
        self.with_surveys(|surveys| {
            if surveys
                .iter()
                .any(|existing| existing.survey_code() == survey.survey_code())
            {
                return Err(SurveyError::Conflict(format!(
                    "survey code already in use: {}",
                    survey.survey_code()
                )));
            }
            surveys.push(survey.clone());
            Ok(())
        })
    }

    fn find_by_code(&self, code: &str) -> Result<Option<Survey>> {
        self.with_surveys(|surveys| {
            Ok(surveys
                .iter()
                .find(|survey| survey.survey_code() == code)
                .cloned())
        })
    }

    fn delete(&self, code: &str) -> Result<bool> {
        self.with_surveys(|surveys| {
            let before = surveys.len();
            surveys.retain(|survey| survey.survey_code() != code);
            Ok(surveys.len() != before)
        })
    }

    fn find_all(&self) -> Result<Vec<Survey>> {
        self.with_surveys(|surveys| Ok(surveys.clone()))
    }

    fn count(&self) -> Result<usize> {
        self.with_surveys(|surveys| Ok(surveys.len()))
    }

    fn modify(
        &self,
        code: &str,
        apply: &mut dyn FnMut(&mut Survey) -> Result<()>,
    ) -> Result<Option<Survey>> {
        self.with_surveys(|surveys| {
            let Some(slot) = surveys
                .iter_mut()
                .find(|survey| survey.survey_code() == code)
            else {
                return Ok(None);
            };
            let mut draft = slot.clone();
            apply(&mut draft)?;
            *slot = draft.clone();
            Ok(Some(draft))
        })
    }
}
