//! Owner authorization and results visibility.

use crate::error::{Result, SurveyError};
use crate::models::Survey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized,
    Denied,
}

impl AccessDecision {
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Changed,
    Unchanged,
}

/// Public results need no password; private results need the owner's.
#[must_use]
pub fn authorize_results_view(survey: &Survey, supplied_password: Option<&str>) -> AccessDecision {
    if survey.is_public() {
        return AccessDecision::Authorized;
    }
    match supplied_password {
        Some(password) if survey.verify_password(password) => AccessDecision::Authorized,
        _ => AccessDecision::Denied,
    }
}

pub fn require_owner(survey: &Survey, supplied_password: &str) -> Result<()> {
    if survey.verify_password(supplied_password) {
        Ok(())
    } else {
        Err(SurveyError::PermissionDenied(format!(
            "password does not match survey {}",
            survey.survey_code()
        )))
    }
}

/// Re-applying the current visibility is a no-op, not an error.
pub fn set_visibility(
    survey: &mut Survey,
    supplied_password: &str,
    is_public: bool,
) -> Result<VisibilityChange> {
    require_owner(survey, supplied_password)?;
    if survey.is_public() == is_public {
        return Ok(VisibilityChange::Unchanged);
    }
    survey.set_public(is_public);
    Ok(VisibilityChange::Changed)
}

pub fn make_public(survey: &mut Survey, supplied_password: &str) -> Result<VisibilityChange> {
    set_visibility(survey, supplied_password, true)
}

pub fn make_private(survey: &mut Survey, supplied_password: &str) -> Result<VisibilityChange> {
    set_visibility(survey, supplied_password, false)
}
