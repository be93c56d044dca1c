pub mod activity;
pub mod dashboard;
pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /session/validate      session validation (cookie)
/// /activity              recent activity (session)
/// /activity/ws           live activity feed (session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/session", session::router())
        .nest("/activity", activity::router())
}
