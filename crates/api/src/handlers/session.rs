//! Handler for on-demand session validation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::auth::cookie::session_token;
use crate::auth::session::verify_session_token;
use crate::middleware::auth::log_rejection;
use crate::state::AppState;

/// Body of `GET /session/validate`. Never says why a session was rejected.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub ok: bool,
}

/// GET /api/v1/session/validate
///
/// Verify the session cookie's signature and expiry. Returns 200
/// `{"ok": true}` for a valid session, 401 `{"ok": false}` otherwise.
pub async fn validate(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (StatusCode, Json<ValidateResponse>) {
    let session = &state.config.session;

    match verify_session_token(session_token(&jar, session), session) {
        Ok(claims) => {
            tracing::debug!(sub = ?claims.sub, "Session validated");
            (StatusCode::OK, Json(ValidateResponse { ok: true }))
        }
        Err(rejection) => {
            log_rejection(rejection, "/api/v1/session/validate");
            (StatusCode::UNAUTHORIZED, Json(ValidateResponse { ok: false }))
        }
    }
}
