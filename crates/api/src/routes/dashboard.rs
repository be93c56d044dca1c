//! Route definitions for the protected dashboard area.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at the protected prefix (default `/dashboard`).
///
/// ```text
/// GET /        -> home (requires session)
/// GET /login   -> login prompt (ungated)
/// GET /logout  -> logout (ungated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/login", get(dashboard::login))
        .route("/logout", get(dashboard::logout))
}
