//! Route definitions for the `/session` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/session`.
///
/// ```text
/// GET /validate  -> validate (cookie verified, {ok} + 200/401)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/validate", get(session::validate))
}
