use axum::http::{StatusCode, header::CONTENT_TYPE};

use super::harness::{SEEDED_CODE, TestHarness, header_value, json_request};

#[tokio::test]
async fn responses_include_security_headers() {
    let harness = TestHarness::setup();

    for response in [
        harness.get("/").await,
        harness.get(&format!("/survey/{SEEDED_CODE}")).await,
        harness
            .send(json_request(
                "/surveyResultData",
                serde_json::json!({ "surveyCode": SEEDED_CODE }),
            ))
            .await,
    ] {
        let headers = response.headers();
        assert_eq!(header_value(headers, "x-content-type-options"), Some("nosniff"));
        assert_eq!(header_value(headers, "x-frame-options"), Some("DENY"));
        assert_eq!(header_value(headers, "referrer-policy"), Some("no-referrer"));
        assert_eq!(header_value(headers, "cache-control"), Some("no-store"));
        let csp = header_value(headers, "content-security-policy").expect("csp header");
        assert!(csp.contains("default-src 'self'"));
        assert!(csp.contains("form-action 'self'"));
        assert!(csp.contains("frame-ancestors 'none'"));
        assert!(!csp.contains("'unsafe-inline'"));
    }
}

#[tokio::test]
async fn static_assets_are_served_with_content_types() {
    let harness = TestHarness::setup();

    let css = harness.get("/assets/site.css").await;
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(
        header_value(css.headers(), CONTENT_TYPE.as_str()),
        Some("text/css; charset=utf-8")
    );

    for path in ["/assets/create.js", "/assets/answer.js"] {
        let js = harness.get(path).await;
        assert_eq!(js.status(), StatusCode::OK, "{path}");
        assert_eq!(
            header_value(js.headers(), CONTENT_TYPE.as_str()),
            Some("application/javascript; charset=utf-8")
        );
    }
}

#[tokio::test]
async fn prompt_markup_is_not_injected_into_pages() {
    let harness = TestHarness::setup();
    let created = harness
        .service()
        .create_survey(
            serde_json::from_value(serde_json::json!({
                "title": "<img src=x onerror=alert(1)>",
                "password": "pw-123",
                "questions": [
                    { "question": "<script>alert(1)</script> Why?", "questionType": "OPEN_ENDED" }
                ]
            }))
            .expect("survey body"),
        )
        .expect("create survey");

    let body = super::harness::body_text(
        harness
            .get(&format!("/survey/{}", created.survey_code()))
            .await,
    )
    .await;
    assert!(!body.contains("<script>alert"));
    assert!(!body.contains("<img src=x"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn owner_form_responses_restrict_form_targets() {
    let harness = TestHarness::setup();
    let response = harness
        .post_form(
            "/surveyResults",
            &format!(
                "surveyCode={SEEDED_CODE}&surveyPassword={}",
                super::harness::SEEDED_PASSWORD
            ),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let csp = header_value(response.headers(), "content-security-policy").expect("csp header");
    assert!(csp.contains("form-action 'self'"));
    assert!(csp.contains("style-src 'self'; script-src 'self'"));
    assert_eq!(header_value(response.headers(), "cache-control"), Some("no-store"));
}
