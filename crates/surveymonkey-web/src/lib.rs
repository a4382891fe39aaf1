use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use surveymonkey_core::SurveyService;

mod dto;
mod error;
mod handlers;
mod html;
mod security;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) service: SurveyService,
}

impl WebState {
    fn new(service: SurveyService) -> Self {
        Self { service }
    }
}

/// Start the survey web server and block until shutdown.
///
/// The store is closed once the server has drained.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot be
/// bound, the server exits with a runtime failure, or the store fails to close.
pub fn serve_web(service: SurveyService, host: &str, port: u16) -> Result<()> {
    let state = WebState::new(service.clone());
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    let surveys = service
        .store()
        .count()
        .context("failed to read survey store before serving")?;
    tracing::info!(surveys, "survey store ready");

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        tracing::info!(addr = %listener.local_addr()?, "survey web server listening");

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutdown requested");
            })
            .await
            .context("web server failed")
    })?;

    service.shutdown().context("failed to close survey store")?;
    tracing::info!("survey store closed");
    Ok(())
}

pub(crate) fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::available_surveys))
        .route("/home", get(handlers::home))
        .route("/assets/site.css", get(handlers::site_css))
        .route("/assets/create.js", get(handlers::create_js))
        .route("/assets/answer.js", get(handlers::answer_js))
        .route("/surveyQuestions", get(handlers::survey_questions))
        .route("/create", post(handlers::create_survey))
        .route("/survey/{code}", get(handlers::survey_page))
        .route("/answersStored", post(handlers::store_answers))
        .route("/submissionPage", get(handlers::submission_page))
        .route("/survey/results/{code}", get(handlers::public_results_page))
        .route("/surveyResults", post(handlers::survey_results))
        .route(
            "/surveyResultsWithoutPassword",
            post(handlers::survey_results_without_password),
        )
        .route("/surveyResultData", post(handlers::survey_result_data))
        .route("/deleteSurvey", post(handlers::delete_survey))
        .route("/public/{code}", post(handlers::make_public))
        .route("/private/{code}", post(handlers::make_private))
        .layer(middleware::from_fn(security::security_headers_middleware))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(%method, path, status, elapsed_ms, "request");
    response
}
