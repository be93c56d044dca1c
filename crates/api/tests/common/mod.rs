#![allow(dead_code)]

use std::sync::Arc;

use aurora_db::MemoryActivityStore;
use aurora_events::{ActivityHub, ActivityRecorder};
use axum::body::Body;
use axum::http::header::COOKIE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use aurora_api::auth::session::{generate_session_token, SessionConfig, DEFAULT_COOKIE_NAME};
use aurora_api::config::ServerConfig;
use aurora_api::middleware::session_gate::GateConfig;
use aurora_api::router::build_app_router;
use aurora_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and a known session secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: "/".to_string(),
            cookie_domain: None,
            secret: TEST_SECRET.to_string(),
            ttl_mins: 60,
        },
        gate: GateConfig::default(),
        login_url: "/auth/signin".to_string(),
    }
}

/// The application under test plus handles on its activity pipeline.
pub struct TestApp {
    pub router: Router,
    pub recorder: Arc<ActivityRecorder>,
    pub store: Arc<MemoryActivityStore>,
}

/// Build the full application router over an in-memory activity store.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (session gate, CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

/// [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemoryActivityStore::new());
    let recorder = Arc::new(ActivityRecorder::new(
        store.clone(),
        Arc::new(ActivityHub::new()),
    ));

    let state = AppState {
        config: Arc::new(config),
        recorder: Arc::clone(&recorder),
    };

    TestApp {
        router: build_app_router(state),
        recorder,
        store,
    }
}

/// Mint a valid session token for `user_id` with the test secret.
pub fn session_token(user_id: i64) -> String {
    generate_session_token(user_id, &test_config().session).expect("token generation should succeed")
}

/// `Cookie` header value carrying `token` as the session cookie.
pub fn session_cookie(token: &str) -> String {
    format!("{DEFAULT_COOKIE_NAME}={token}")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
