//! Session-cookie authentication extractor for Axum handlers.

use aurora_core::error::CoreError;
use aurora_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookie::session_token;
use crate::auth::session::{verify_session_token, SessionRejection};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a verified session cookie.
///
/// ```ignore
/// async fn my_handler(session: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The user's internal id, from the token's `sub` claim.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = &state.config.session;
        let jar = CookieJar::from_headers(&parts.headers);
        let unauthorized =
            || AppError::Core(CoreError::Unauthorized("Missing, invalid, or expired session".into()));

        let claims = verify_session_token(session_token(&jar, session), session).map_err(|rejection| {
            log_rejection(rejection, parts.uri.path());
            unauthorized()
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            tracing::warn!(path = parts.uri.path(), "Session has no numeric subject");
            unauthorized()
        })?;

        Ok(AuthSession { user_id })
    }
}

/// Log why a session was rejected. A missing cookie is routine; a bad
/// signature may indicate tampering.
pub fn log_rejection(rejection: SessionRejection, path: &str) {
    match rejection {
        SessionRejection::Missing | SessionRejection::Expired => {
            tracing::debug!(cause = rejection.as_str(), path, "Session rejected");
        }
        SessionRejection::BadSignature | SessionRejection::Malformed => {
            tracing::warn!(cause = rejection.as_str(), path, "Session rejected");
        }
    }
}
