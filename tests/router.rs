//! Integration tests for the gateway's HTTP surface.
//!
//! These run against the real router with the session middleware attached but
//! without a reachable database: the pool is created lazily and the exercised
//! paths (gates, validation failures, form rendering, logout, 404) never
//! issue a query. Flows that need a live store are covered by the unit tests
//! around their pure seams.

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, LOCATION},
        Request, StatusCode,
    },
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use portero::api::router;

fn app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:5432/portero")
        .expect("lazy pool");

    router()
        .layer(SessionManagerLayer::new(MemoryStore::default()))
        .layer(Extension(pool))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn form_post(path: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request")
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

fn location(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn unknown_route_responds_not_found() {
    let response = app().oneshot(get("/nope")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_form_renders() {
    let response = app().oneshot(get("/login")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("action=\"/login\""));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
async fn register_form_renders() {
    let response = app().oneshot(get("/register")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("action=\"/register\""));
}

#[tokio::test]
async fn user_page_without_session_redirects_to_login() {
    let response = app().oneshot(get("/user")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn admin_page_without_session_redirects_to_login() {
    let response = app().oneshot(get("/admin")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn logout_always_redirects_to_login() {
    let response = app().oneshot(get("/logout")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn login_with_missing_fields_shows_validation_error() {
    let response = app()
        .oneshot(form_post("/login", "email=alice%40example.com"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("All fields are required."));
}

#[tokio::test]
async fn login_with_empty_body_shows_validation_error() {
    let response = app()
        .oneshot(form_post("/login", ""))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("All fields are required."));
}

#[tokio::test]
async fn register_with_missing_fields_shows_validation_error() {
    let response = app()
        .oneshot(form_post("/register", "password=secret1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("All fields are required."));
}

#[tokio::test]
async fn method_mismatch_on_gated_page_responds_not_found() {
    // A known path with an unregistered method is outside the surface: 404,
    // never 405.
    let response = app()
        .oneshot(form_post("/user", ""))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn method_mismatch_on_login_responds_not_found() {
    let request = Request::builder()
        .method("PUT")
        .uri("/login")
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_identity_and_degraded_store() {
    // A lazy pool aimed at a closed port makes the store check fail fast and
    // deterministically.
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:6/portero")
        .expect("lazy pool");
    let app = router()
        .layer(SessionManagerLayer::new(MemoryStore::default()))
        .layer(Extension(pool));

    let response = app.oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let x_app = response
        .headers()
        .get("X-App")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(x_app.starts_with("portero:"));

    let body: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json body");
    assert_eq!(body["name"], "portero");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["store"], "degraded");
}
