use axum::{
    Router,
    body::{Body, to_bytes},
    http::Request,
    response::Response,
};
use tower::util::ServiceExt;

use surveymonkey_core::{Question, ServiceConfig, Survey, SurveyService};

use crate::{WebState, app_router};

pub(super) const SEEDED_CODE: &str = "TestCode";
pub(super) const SEEDED_TITLE: &str = "Favourite colours";
pub(super) const SEEDED_PASSWORD: &str = "correct-horse";

pub(super) struct TestHarness {
    _temp: tempfile::TempDir,
    pub(super) state: WebState,
    pub(super) router: Router,
}

impl TestHarness {
    /// SQLite-backed service holding one private survey under `TestCode`.
    pub(super) fn setup() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let service = SurveyService::open(temp.path(), ServiceConfig::default()).expect("service");

        let mut survey = Survey::new(SEEDED_TITLE, SEEDED_PASSWORD).with_questions([
            Question::open_ended("What is life?"),
            Question::multiple_choice("What color is the best?", ["Green", "Blue"]),
        ]);
        survey.set_survey_code(SEEDED_CODE);
        service.save_survey(&survey).expect("seed survey");

        let state = WebState::new(service);
        let router = app_router(state.clone());
        Self {
            _temp: temp,
            state,
            router,
        }
    }

    pub(super) fn service(&self) -> &SurveyService {
        &self.state.service
    }

    pub(super) fn seeded_survey(&self) -> Survey {
        self.service()
            .find_survey(SEEDED_CODE)
            .expect("find seeded survey")
            .expect("seeded survey present")
    }

    pub(super) async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("response")
    }

    pub(super) async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub(super) async fn post(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub(super) async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("form request"),
        )
        .await
    }
}

pub(super) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub(super) async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body bytes");
    serde_json::from_slice(&bytes).expect("decode json")
}

pub(super) fn header_value<'a>(headers: &'a axum::http::HeaderMap, key: &str) -> Option<&'a str> {
    headers.get(key).and_then(|value| value.to_str().ok())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "tests usually pass temporary `json!` values directly"
)]
pub(super) fn json_request(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&body).expect("json request body"),
        ))
        .expect("json request")
}
