use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use surveymonkey_core::SurveyError;

use crate::html;

pub const NO_SURVEY_MESSAGE: &str = "Sorry, there is no survey with that link.";
pub const ACCESS_DENIED_MESSAGE: &str =
    "Sorry, that survey link and password do not match any survey you can access.";

#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn survey_error_response(
    err: SurveyError,
    operation: &str,
    survey_code: Option<String>,
) -> Response {
    let status = status_for_survey_error(&err);
    if status.is_server_error() {
        tracing::error!(operation, error = %err, "request failed");
    }
    let payload = err.to_payload(operation.to_string(), survey_code);
    (status, Json(payload)).into_response()
}

/// HTML surfaces answer with a 200 page for unknown surveys and wrong
/// passwords alike; only infrastructure failures become error statuses.
#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn denial_page(err: SurveyError, operation: &str) -> Response {
    if err.is_access_denial() {
        tracing::debug!(operation, error = %err, "access denied");
        return Html(html::message_page("Survey unavailable", ACCESS_DENIED_MESSAGE))
            .into_response();
    }
    if matches!(err, SurveyError::Validation(_)) {
        return Html(html::message_page("Survey unavailable", &err.to_string())).into_response();
    }
    tracing::error!(operation, error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(html::message_page(
            "Something went wrong",
            "Sorry, something went wrong on our side. Please try again.",
        )),
    )
        .into_response()
}

fn status_for_survey_error(err: &SurveyError) -> StatusCode {
    match err {
        SurveyError::Validation(_) => StatusCode::BAD_REQUEST,
        SurveyError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        SurveyError::NotFound(_) => StatusCode::NOT_FOUND,
        SurveyError::Conflict(_) => StatusCode::CONFLICT,
        SurveyError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        SurveyError::Config(_)
        | SurveyError::Io(_)
        | SurveyError::Json(_)
        | SurveyError::Sqlite(_)
        | SurveyError::Toml(_)
        | SurveyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
