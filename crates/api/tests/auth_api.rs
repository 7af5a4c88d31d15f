//! Router-level tests for authentication, authorization, and request
//! plumbing, driven through the full middleware stack with
//! `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use common::{admin_token, body_json, build_test_app, employee_token, token_for, TEST_ORIGIN};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn authed(method: Method, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_without_token_is_rejected() {
    let app = build_test_app();

    let response = app.oneshot(get("/api/v1/patterns")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn non_bearer_authorization_header_is_rejected() {
    let app = build_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/patterns")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = build_test_app();

    let request = authed(Method::GET, "/api/v1/patterns", "not-a-jwt", None);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn token_with_unknown_role_is_rejected() {
    let app = build_test_app();

    // A syntactically valid, correctly signed token whose role string the
    // platform does not know must be treated like no token at all.
    let token = token_for(3, "superuser");
    let request = authed(Method::GET, "/api/v1/patterns", &token, None);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn employee_cannot_trigger_sweep() {
    let app = build_test_app();

    let request = authed(
        Method::POST,
        "/api/v1/rotation/sweep",
        &employee_token(),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Admin role required");
}

#[tokio::test]
async fn employee_cannot_onboard_assignments() {
    let app = build_test_app();

    let request = authed(
        Method::POST,
        "/api/v1/rotation/assignments",
        &employee_token(),
        Some(serde_json::json!({ "user_id": 5, "current_woche": 3 })),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Input validation ahead of the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_woche_is_rejected_before_any_query() {
    let app = build_test_app();

    let request = authed(
        Method::PUT,
        "/api/v1/rotation/assignments/5",
        &admin_token(),
        Some(serde_json::json!({ "current_woche": 99 })),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Woche must be between 1 and 15, got 99");
}

#[tokio::test]
async fn short_new_password_is_rejected() {
    let app = build_test_app();

    let request = authed(
        Method::POST,
        "/api/v1/auth/change-password",
        &employee_token(),
        Some(serde_json::json!({
            "current_password": "old-password",
            "new_password": "kurz",
        })),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Password must be at least 8 characters long");
}

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_with_request_id() {
    let app = build_test_app();

    let response = app.oneshot(get("/api/v1/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(
        response.headers().contains_key("x-request-id"),
        "every response must carry a request id"
    );
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/patterns")
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(TEST_ORIGIN)
    );
}
