use crate::{
    api::handlers::{auth, health},
    cli::globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tower_sessions::{
    cookie::{Key, SameSite},
    Expiry, MemoryStore, SessionManagerLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub(crate) mod handlers;
pub(crate) mod views;

/// Start the server
///
/// # Errors
/// Returns an error if the database is unreachable, migrations fail, or the
/// listener cannot be bound
pub async fn new(port: u16, dsn: String, globals: &GlobalArgs) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // Session middleware owns cookie management and idle expiry; handlers only
    // read and write the identity record.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(auth::session::SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Strict)
        .with_secure(globals.secure_cookies)
        .with_expiry(Expiry::OnInactivity(auth::session::IDLE_TIMEOUT))
        .with_signed(signing_key(globals)?);

    let app = router().layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(session_layer)
            .layer(Extension(pool.clone())),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

/// Build the gateway router: the auth surface, health, and a 404 fallback.
///
/// Callers still need to attach the session layer and a pool `Extension`.
#[must_use]
pub fn router() -> Router {
    // The fallback hangs off each method router too: an unregistered method
    // on a known path is outside the surface and reads as 404, not 405.
    Router::new()
        .route(
            "/login",
            get(auth::show_login).post(auth::login).fallback(not_found),
        )
        .route(
            "/register",
            get(auth::show_register)
                .post(auth::register)
                .fallback(not_found),
        )
        .route("/user", get(auth::user_page).fallback(not_found))
        .route("/admin", get(auth::admin_page).fallback(not_found))
        .route("/logout", get(auth::logout).fallback(not_found))
        .route("/health", get(health::health).fallback(not_found))
        .fallback(not_found)
}

// Everything outside the auth surface is a 404.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Derive the cookie-signing key from the configured secret.
///
/// The cookie key needs 64 bytes of material; the secret is stretched through
/// SHA-512 so any accepted secret produces a valid key.
fn signing_key(globals: &GlobalArgs) -> Result<Key> {
    let digest = Sha512::digest(globals.session_secret.expose_secret().as_bytes());

    Key::try_from(digest.as_slice())
        .map_err(|err| anyhow!("Failed to derive cookie signing key: {err}"))
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
