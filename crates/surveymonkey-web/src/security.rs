use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{self, HeaderName},
    },
    middleware::Next,
    response::Response,
};

/// Owner forms post the survey password to `/surveyResults`, `/deleteSurvey`,
/// `/public/{code}` and `/private/{code}`; `form-action 'self'` keeps injected
/// markup from redirecting those posts off-site.
const SURVEY_CSP: &str = "default-src 'self'; connect-src 'self'; img-src 'self'; \
    style-src 'self'; script-src 'self'; form-action 'self'; object-src 'none'; \
    base-uri 'none'; frame-ancestors 'none'";

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_security_headers(response.headers_mut());
    response
}

fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );
    // Survey codes and passwords travel in query strings; keep them out of caches.
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(SURVEY_CSP),
    );
}
