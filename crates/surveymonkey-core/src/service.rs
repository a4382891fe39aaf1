use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::access::{self, VisibilityChange};
use crate::answers::apply_answers;
use crate::code::generate_survey_code;
use crate::config::ServiceConfig;
use crate::credential::PasswordCredential;
use crate::error::{Result, SurveyError};
use crate::models::{
    AnswerSubmission, NewSurvey, Question, QuestionDraft, Survey, SurveySummary,
};
use crate::results::SurveyResults;
use crate::store::{MemorySurveyStore, SqliteSurveyStore, SurveyStore};

const MAX_CODE_ATTEMPTS: usize = 8;

/// Entry point for every survey operation; owns the injected store.
#[derive(Clone)]
pub struct SurveyService {
    store: Arc<dyn SurveyStore>,
    config: ServiceConfig,
}

impl std::fmt::Debug for SurveyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SurveyService {
    #[must_use]
    pub fn new(store: Arc<dyn SurveyStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Open the SQLite-backed service rooted at `root_dir`.
    pub fn open(root_dir: impl Into<PathBuf>, config: ServiceConfig) -> Result<Self> {
        let root = root_dir.into();
        fs::create_dir_all(&root)?;
        let store = SqliteSurveyStore::open(config.resolve_db_path(&root))?;
        Ok(Self::new(Arc::new(store), config))
    }

    #[must_use]
    pub fn in_memory(config: ServiceConfig) -> Self {
        Self::new(Arc::new(MemorySurveyStore::new()), config)
    }

    #[must_use]
    pub fn store(&self) -> &dyn SurveyStore {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn create_survey(&self, request: NewSurvey) -> Result<Survey> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(SurveyError::Validation(
                "survey title must not be empty".to_string(),
            ));
        }
        PasswordCredential::validate_plaintext(&request.password)?;
        let questions = request
            .questions
            .into_iter()
            .map(QuestionDraft::into_question)
            .collect::<Result<Vec<Question>>>()?;

        let mut survey = Survey::new(title, &request.password).with_questions(questions);
        for _ in 0..MAX_CODE_ATTEMPTS {
            survey.set_survey_code(generate_survey_code(self.config.code_length));
            match self.store.insert_new(&survey) {
                Ok(()) => {
                    tracing::info!(
                        survey_code = survey.survey_code(),
                        questions = survey.questions().len(),
                        "survey created"
                    );
                    return Ok(survey);
                }
                Err(SurveyError::Conflict(_)) => {
                    tracing::debug!(survey_code = survey.survey_code(), "survey code collision");
                }
                Err(err) => return Err(err),
            }
        }
        Err(SurveyError::Conflict(format!(
            "could not allocate a unique survey code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    /// Persist a survey as-is, keeping whatever code it carries.
    pub fn save_survey(&self, survey: &Survey) -> Result<()> {
        self.store.save(survey)
    }

    pub fn find_survey(&self, survey_code: &str) -> Result<Option<Survey>> {
        self.store.find_by_code(survey_code)
    }

    pub fn list_surveys(&self) -> Result<Vec<SurveySummary>> {
        Ok(self
            .store
            .find_all()?
            .iter()
            .map(Survey::summary)
            .collect())
    }

    pub fn record_answers(&self, submission: &AnswerSubmission) -> Result<usize> {
        let strict = self.config.strict_answers;
        let mut recorded = 0;
        let updated = self.store.modify(&submission.survey_code, &mut |survey| {
            recorded = apply_answers(survey, &submission.answers, strict)?;
            Ok(())
        })?;
        if updated.is_none() {
            return Err(not_found(&submission.survey_code));
        }
        tracing::info!(
            survey_code = submission.survey_code.as_str(),
            recorded,
            "answers recorded"
        );
        Ok(recorded)
    }

    /// Results by code alone; callers decide whether that is appropriate.
    pub fn results(&self, survey_code: &str) -> Result<SurveyResults> {
        let survey = self.require_survey(survey_code)?;
        Ok(SurveyResults::from_survey(&survey))
    }

    pub fn results_with_password(&self, survey_code: &str, password: &str) -> Result<SurveyResults> {
        self.authorized_results(survey_code, Some(password))
    }

    /// Results of a survey whose owner made them public.
    pub fn public_results(&self, survey_code: &str) -> Result<SurveyResults> {
        self.authorized_results(survey_code, None)
    }

    pub fn make_public(&self, survey_code: &str, password: &str) -> Result<Survey> {
        self.set_visibility(survey_code, password, true)
    }

    pub fn make_private(&self, survey_code: &str, password: &str) -> Result<Survey> {
        self.set_visibility(survey_code, password, false)
    }

    pub fn delete_survey(&self, survey_code: &str, password: &str) -> Result<()> {
        let survey = self.require_survey(survey_code)?;
        if let Err(err) = access::require_owner(&survey, password) {
            tracing::warn!(survey_code, "survey delete denied");
            return Err(err);
        }
        if !self.store.delete(survey_code)? {
            return Err(not_found(survey_code));
        }
        tracing::info!(survey_code, "survey deleted");
        Ok(())
    }

    pub fn shutdown(&self) -> Result<()> {
        self.store.close()
    }

    fn require_survey(&self, survey_code: &str) -> Result<Survey> {
        self.store
            .find_by_code(survey_code)?
            .ok_or_else(|| not_found(survey_code))
    }

    fn authorized_results(
        &self,
        survey_code: &str,
        password: Option<&str>,
    ) -> Result<SurveyResults> {
        let survey = self.require_survey(survey_code)?;
        if access::authorize_results_view(&survey, password).is_authorized() {
            return Ok(SurveyResults::from_survey(&survey));
        }
        tracing::warn!(survey_code, "results view denied");
        Err(SurveyError::PermissionDenied(format!(
            "results of survey {survey_code} are private"
        )))
    }

    fn set_visibility(&self, survey_code: &str, password: &str, is_public: bool) -> Result<Survey> {
        let mut change = VisibilityChange::Unchanged;
        let updated = self.store.modify(survey_code, &mut |survey| {
            change = access::set_visibility(survey, password, is_public)?;
            Ok(())
        });
        let updated = match updated {
            Ok(Some(survey)) => survey,
            Ok(None) => return Err(not_found(survey_code)),
            Err(err) => {
                tracing::warn!(survey_code, is_public, "visibility change denied");
                return Err(err);
            }
        };
        let changed = change == VisibilityChange::Changed;
        tracing::info!(survey_code, is_public, changed, "survey visibility set");
        Ok(updated)
    }
}

fn not_found(survey_code: &str) -> SurveyError {
    SurveyError::NotFound(format!("survey {survey_code}"))
}
