//! Shared helpers for the HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use alumni_api::auth::jwt::JwtConfig;
use alumni_api::auth::password::hash_password;
use alumni_api::config::{LogFormat, ServerConfig};
use alumni_api::notifications::{LogNotifier, StatusChangeEvent, StatusNotifier};
use alumni_api::router::build_app_router;
use alumni_api::state::AppState;
use alumni_core::submission::DedupWindow;
use alumni_db::models::user::{CreateUser, User};
use alumni_db::repositories::UserRepo;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        dedup_window: DedupWindow::default(),
        database_url: String::new(),
        db_max_connections: 5,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, mirroring `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_notifier(pool, Arc::new(LogNotifier))
}

/// Build the application router with a custom status notifier.
pub fn build_test_app_with_notifier(pool: PgPool, notifier: Arc<dyn StatusNotifier>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier,
    };
    build_app_router(state, &config).expect("test config is valid")
}

/// Notifier that forwards every event to a channel.
pub struct ChannelNotifier(pub mpsc::UnboundedSender<StatusChangeEvent>);

#[async_trait]
impl StatusNotifier for ChannelNotifier {
    async fn status_changed(&self, event: StatusChangeEvent) {
        let _ = self.0.send(event);
    }
}

/// Wait briefly for the next notifier event.
pub async fn next_event(
    rx: &mut mpsc::UnboundedReceiver<StatusChangeEvent>,
) -> Option<StatusChangeEvent> {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .ok()
        .flatten()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, display_name: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        display_name: display_name.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in via the API and return the access token.
pub async fn login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response carries access_token")
        .to_string()
}

/// Create a user and log them in, returning `(user, access_token)`.
pub async fn create_and_login(
    app: Router,
    pool: &PgPool,
    email: &str,
    display_name: &str,
    role: &str,
) -> (User, String) {
    let user = create_user(pool, email, display_name, role).await;
    let token = login(app, email).await;
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
