use axum::{
    Form, Json,
    extract::{Path, Query, State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use surveymonkey_core::models::{AnswerSubmission, NewSurvey};

use crate::WebState;
use crate::dto::{
    AnswersStoredResponse, CreateSurveyResponse, OwnerQuery, PrivateQuery, PublicQuery,
    SurveyCodeRequest, SurveyQuestionsQuery,
};
use crate::error::{NO_SURVEY_MESSAGE, denial_page, survey_error_response};
use crate::html;

pub async fn available_surveys(State(state): State<WebState>) -> Response {
    match state.service.list_surveys() {
        Ok(surveys) => Html(html::available_surveys_page(&surveys)).into_response(),
        Err(err) => denial_page(err, "survey.list"),
    }
}

pub async fn home() -> Html<String> {
    Html(html::home_page())
}

pub async fn site_css() -> Response {
    static_asset("text/css; charset=utf-8", html::SITE_CSS)
}

pub async fn create_js() -> Response {
    static_asset("application/javascript; charset=utf-8", html::CREATE_JS)
}

pub async fn answer_js() -> Response {
    static_asset("application/javascript; charset=utf-8", html::ANSWER_JS)
}

fn static_asset(content_type: &'static str, body: &'static str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

pub async fn survey_questions(Query(query): Query<SurveyQuestionsQuery>) -> Html<String> {
    Html(html::survey_questions_page(&query.title))
}

pub async fn create_survey(
    State(state): State<WebState>,
    Json(request): Json<NewSurvey>,
) -> Response {
    match state.service.create_survey(request) {
        Ok(survey) => {
            let survey_code = survey.survey_code().to_string();
            (
                StatusCode::OK,
                Json(CreateSurveyResponse {
                    survey_link: format!("/survey/{survey_code}"),
                    survey_code,
                    title: survey.title().to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => survey_error_response(err, "survey.create", None),
    }
}

pub async fn survey_page(State(state): State<WebState>, Path(code): Path<String>) -> Response {
    match state.service.find_survey(&code) {
        Ok(Some(survey)) => Html(html::survey_page(&survey)).into_response(),
        Ok(None) => {
            tracing::debug!(survey_code = code.as_str(), "survey page for unknown code");
            Html(html::message_page("Survey not found", NO_SURVEY_MESSAGE)).into_response()
        }
        Err(err) => denial_page(err, "survey.page"),
    }
}

pub async fn store_answers(
    State(state): State<WebState>,
    Json(submission): Json<AnswerSubmission>,
) -> Response {
    match state.service.record_answers(&submission) {
        Ok(recorded) => (
            StatusCode::OK,
            Json(AnswersStoredResponse {
                status: "ok".to_string(),
                survey_code: submission.survey_code,
                recorded,
            }),
        )
            .into_response(),
        Err(err) => survey_error_response(err, "answers.store", Some(submission.survey_code)),
    }
}

pub async fn submission_page() -> Html<String> {
    Html(html::submission_page())
}

pub async fn public_results_page(
    State(state): State<WebState>,
    Path(code): Path<String>,
) -> Response {
    match state.service.public_results(&code) {
        Ok(results) => Html(html::results_page(&results)).into_response(),
        Err(err) => denial_page(err, "results.public"),
    }
}

pub async fn survey_results(
    State(state): State<WebState>,
    Query(query): Query<OwnerQuery>,
    form: Result<Form<OwnerQuery>, FormRejection>,
) -> Response {
    let owner = merge_owner(query, form.ok().map(|Form(body)| body));
    match state
        .service
        .results_with_password(&owner.survey_code, &owner.survey_password)
    {
        Ok(results) => Html(html::results_page(&results)).into_response(),
        Err(err) => denial_page(err, "results.owner"),
    }
}

pub async fn survey_results_without_password(
    State(state): State<WebState>,
    Json(request): Json<SurveyCodeRequest>,
) -> Response {
    match state.service.public_results(&request.survey_code) {
        Ok(results) => Html(html::results_page(&results)).into_response(),
        Err(err) => denial_page(err, "results.public"),
    }
}

pub async fn survey_result_data(
    State(state): State<WebState>,
    Json(request): Json<SurveyCodeRequest>,
) -> Response {
    match state.service.results(&request.survey_code) {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => survey_error_response(err, "results.data", Some(request.survey_code)),
    }
}

pub async fn delete_survey(
    State(state): State<WebState>,
    Query(query): Query<OwnerQuery>,
    form: Result<Form<OwnerQuery>, FormRejection>,
) -> Response {
    let owner = merge_owner(query, form.ok().map(|Form(body)| body));
    match state
        .service
        .delete_survey(&owner.survey_code, &owner.survey_password)
    {
        Ok(()) => Html(html::deleted_page()).into_response(),
        Err(err) => denial_page(err, "survey.delete"),
    }
}

pub async fn make_public(
    State(state): State<WebState>,
    Path(code): Path<String>,
    Query(query): Query<PublicQuery>,
    form: Result<Form<PublicQuery>, FormRejection>,
) -> Response {
    let password = first_non_empty(query.password, form.ok().map(|Form(body)| body.password));
    match state.service.make_public(&code, &password) {
        Ok(survey) => Html(html::public_link_page(&survey)).into_response(),
        Err(err) => denial_page(err, "survey.public"),
    }
}

pub async fn make_private(
    State(state): State<WebState>,
    Path(code): Path<String>,
    Query(query): Query<PrivateQuery>,
    form: Result<Form<PrivateQuery>, FormRejection>,
) -> Response {
    let password = first_non_empty(
        query.password_private,
        form.ok().map(|Form(body)| body.password_private),
    );
    match state.service.make_private(&code, &password) {
        Ok(survey) => Html(html::made_private_page(&survey)).into_response(),
        Err(err) => denial_page(err, "survey.private"),
    }
}

/// Owner forms post url-encoded bodies while links and scripts use the query
/// string; the query wins when both carry a value.
fn merge_owner(query: OwnerQuery, form: Option<OwnerQuery>) -> OwnerQuery {
    let Some(form) = form else {
        return query;
    };
    OwnerQuery {
        survey_code: first_non_empty(query.survey_code, Some(form.survey_code)),
        survey_password: first_non_empty(query.survey_password, Some(form.survey_password)),
    }
}

fn first_non_empty(primary: String, fallback: Option<String>) -> String {
    if primary.is_empty() {
        fallback.unwrap_or_default()
    } else {
        primary
    }
}
