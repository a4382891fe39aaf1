use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SurveyQuestionsQuery {
    #[serde(default)]
    pub title: String,
}

/// Owner credentials for results and deletion. Missing values are treated as
/// empty so they fall through to the regular denial page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    #[serde(default)]
    pub survey_code: String,
    #[serde(default)]
    pub survey_password: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateQuery {
    #[serde(default)]
    pub password_private: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyCodeRequest {
    #[serde(alias = "data")]
    pub survey_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyResponse {
    pub survey_code: String,
    pub title: String,
    pub survey_link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersStoredResponse {
    pub status: String,
    pub survey_code: String,
    pub recorded: usize,
}
