//! Route definitions for the `/activity` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/activity`.
///
/// ```text
/// GET /     -> list (requires session)
/// GET /ws   -> live feed WebSocket (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activity::list))
        .route("/ws", get(ws::activity_feed))
}
