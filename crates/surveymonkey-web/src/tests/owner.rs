use axum::http::StatusCode;
use serde_json::json;

use crate::error::ACCESS_DENIED_MESSAGE;

use super::harness::{
    SEEDED_CODE, SEEDED_PASSWORD, SEEDED_TITLE, TestHarness, body_text, json_request,
};

#[tokio::test]
async fn deleting_the_only_survey_empties_the_store() {
    let harness = TestHarness::setup();
    assert_eq!(harness.service().store().count().expect("count before"), 1);

    let response = harness
        .post(&format!(
            "/deleteSurvey?surveyCode={SEEDED_CODE}&surveyPassword={SEEDED_PASSWORD}"
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Successfully deleted your survey!"));
    assert_eq!(harness.service().store().count().expect("count after"), 0);
}

#[tokio::test]
async fn delete_accepts_form_bodies() {
    let harness = TestHarness::setup();
    let body = body_text(
        harness
            .post_form(
                "/deleteSurvey",
                &format!("surveyCode={SEEDED_CODE}&surveyPassword={SEEDED_PASSWORD}"),
            )
            .await,
    )
    .await;
    assert!(body.contains("Successfully deleted your survey!"));
    assert_eq!(harness.service().store().count().expect("count"), 0);
}

#[tokio::test]
async fn wrong_password_and_unknown_code_look_the_same() {
    let harness = TestHarness::setup();

    let wrong_password = harness
        .post(&format!(
            "/deleteSurvey?surveyCode={SEEDED_CODE}&surveyPassword=guess"
        ))
        .await;
    assert_eq!(wrong_password.status(), StatusCode::OK);
    let wrong_password = body_text(wrong_password).await;

    let unknown_code = harness
        .post("/deleteSurvey?surveyCode=missing&surveyPassword=guess")
        .await;
    assert_eq!(unknown_code.status(), StatusCode::OK);
    let unknown_code = body_text(unknown_code).await;

    assert!(wrong_password.contains(ACCESS_DENIED_MESSAGE));
    assert_eq!(wrong_password, unknown_code);
    assert_eq!(harness.service().store().count().expect("count"), 1);
}

#[tokio::test]
async fn visibility_toggles_between_public_and_private() {
    let harness = TestHarness::setup();
    assert!(!harness.seeded_survey().is_public());

    let public = harness
        .post(&format!("/public/{SEEDED_CODE}?password={SEEDED_PASSWORD}"))
        .await;
    assert_eq!(public.status(), StatusCode::OK);
    let public = body_text(public).await;
    assert!(public.contains("Here is your public survey results link"));
    assert!(public.contains(&format!("/survey/results/{SEEDED_CODE}")));
    assert!(harness.seeded_survey().is_public());

    let private = harness
        .post(&format!(
            "/private/{SEEDED_CODE}?passwordPrivate={SEEDED_PASSWORD}"
        ))
        .await;
    assert_eq!(private.status(), StatusCode::OK);
    assert!(body_text(private)
        .await
        .contains("Survey Results successfully made private"));
    assert!(!harness.seeded_survey().is_public());
}

#[tokio::test]
async fn repeated_publish_is_a_no_op() {
    let harness = TestHarness::setup();
    for _ in 0..2 {
        let body = body_text(
            harness
                .post_form(
                    &format!("/public/{SEEDED_CODE}"),
                    &format!("password={SEEDED_PASSWORD}"),
                )
                .await,
        )
        .await;
        assert!(body.contains("Here is your public survey results link"));
    }
    assert!(harness.seeded_survey().is_public());
}

#[tokio::test]
async fn visibility_change_requires_the_owner_password() {
    let harness = TestHarness::setup();
    let body = body_text(
        harness
            .post(&format!("/public/{SEEDED_CODE}?password=guess"))
            .await,
    )
    .await;
    assert!(body.contains(ACCESS_DENIED_MESSAGE));
    assert!(!harness.seeded_survey().is_public());
}

#[tokio::test]
async fn owner_results_need_the_password() {
    let harness = TestHarness::setup();

    let granted = body_text(
        harness
            .post_form(
                "/surveyResults",
                &format!("surveyCode={SEEDED_CODE}&surveyPassword={SEEDED_PASSWORD}"),
            )
            .await,
    )
    .await;
    assert!(granted.contains(SEEDED_CODE));
    assert!(granted.contains("What is life?"));
    assert!(granted.contains(&format!("action=\"/public/{SEEDED_CODE}\"")));

    let denied = body_text(
        harness
            .post(&format!(
                "/surveyResults?surveyCode={SEEDED_CODE}&surveyPassword=guess"
            ))
            .await,
    )
    .await;
    assert!(denied.contains(ACCESS_DENIED_MESSAGE));
    assert!(!denied.contains("What is life?"));
}

#[tokio::test]
async fn public_results_are_readable_without_a_password() {
    let harness = TestHarness::setup();
    harness
        .service()
        .make_public(SEEDED_CODE, SEEDED_PASSWORD)
        .expect("make public");

    let response = harness
        .send(json_request(
            "/surveyResultsWithoutPassword",
            json!({ "surveyCode": SEEDED_CODE }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("What is life?"));
    assert!(body.contains("What color is the best?"));

    let aliased = body_text(
        harness
            .send(json_request(
                "/surveyResultsWithoutPassword",
                json!({ "data": SEEDED_CODE }),
            ))
            .await,
    )
    .await;
    assert!(aliased.contains("What is life?"));

    let page = body_text(harness.get(&format!("/survey/results/{SEEDED_CODE}")).await).await;
    assert!(page.contains(SEEDED_TITLE));
}

#[tokio::test]
async fn private_results_stay_hidden_without_a_password() {
    let harness = TestHarness::setup();

    let body = body_text(
        harness
            .send(json_request(
                "/surveyResultsWithoutPassword",
                json!({ "surveyCode": SEEDED_CODE }),
            ))
            .await,
    )
    .await;
    assert!(body.contains(ACCESS_DENIED_MESSAGE));
    assert!(!body.contains("What is life?"));

    let page = body_text(harness.get(&format!("/survey/results/{SEEDED_CODE}")).await).await;
    assert!(page.contains(ACCESS_DENIED_MESSAGE));
    assert!(!page.contains(SEEDED_TITLE));
}

#[tokio::test]
async fn public_results_keep_prompt_text_verbatim() {
    let harness = TestHarness::setup();
    let mut survey = surveymonkey_core::Survey::new("Arithmetic", SEEDED_PASSWORD)
        .with_questions([surveymonkey_core::Question::open_ended("What is 2*3*4?")]);
    survey.set_survey_code("MathCode");
    survey.set_public(true);
    harness.service().save_survey(&survey).expect("save survey");

    let body = body_text(
        harness
            .send(json_request(
                "/surveyResultsWithoutPassword",
                json!({ "surveyCode": "MathCode" }),
            ))
            .await,
    )
    .await;
    assert!(body.contains("What is 2*3*4?"));
    assert!(!body.contains("<em>"));

    let page = body_text(harness.get("/survey/MathCode").await).await;
    assert!(page.contains("What is 2*3*4?"));
}
