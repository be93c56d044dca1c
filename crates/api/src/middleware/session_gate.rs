//! Cookie-presence gate for the protected area.
//!
//! Every request under the protected prefix must carry a session cookie,
//! except the login and logout pages themselves. The gate only checks that a
//! value is present; signature verification happens in the validator
//! endpoint and the [`AuthSession`](super::auth::AuthSession) extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookie::session_token;
use crate::state::AppState;

/// Default protected prefix.
const DEFAULT_PROTECTED_PREFIX: &str = "/dashboard";

/// Paths guarded by the session gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Prefix of the protected area, e.g. `/dashboard`.
    pub protected_prefix: String,
    /// `{prefix}/login`, never gated; unauthenticated requests land here.
    pub login_path: String,
    /// `{prefix}/logout`, never gated.
    pub logout_path: String,
}

impl GateConfig {
    /// Build the gate paths for a protected prefix.
    ///
    /// A trailing `/` on the prefix is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the prefix does not start with `/` or is the root itself.
    pub fn new(protected_prefix: &str) -> Self {
        let prefix = protected_prefix.trim_end_matches('/');
        assert!(
            prefix.starts_with('/'),
            "PROTECTED_PREFIX must start with '/' and must not be the root"
        );

        Self {
            protected_prefix: prefix.to_string(),
            login_path: format!("{prefix}/login"),
            logout_path: format!("{prefix}/logout"),
        }
    }

    /// Load the gate configuration from `PROTECTED_PREFIX` (default: `/dashboard`).
    pub fn from_env() -> Self {
        let prefix = std::env::var("PROTECTED_PREFIX")
            .unwrap_or_else(|_| DEFAULT_PROTECTED_PREFIX.into());
        Self::new(&prefix)
    }

    /// Whether `path` is the protected prefix or below it.
    pub fn is_protected(&self, path: &str) -> bool {
        path.strip_prefix(self.protected_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Whether `path` is the login or logout page (trailing `/` ignored).
    pub fn is_exempt(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        path == self.login_path || path == self.logout_path
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_PREFIX)
    }
}

/// Outcome of the gate for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    RedirectToLogin,
}

/// Decide whether a request may proceed.
///
/// Pure and synchronous: only the path and the presence of a session cookie
/// value matter.
pub fn decide(path: &str, session_cookie: Option<&str>, config: &GateConfig) -> GateDecision {
    if config.is_protected(path) && !config.is_exempt(path) && session_cookie.is_none() {
        GateDecision::RedirectToLogin
    } else {
        GateDecision::Pass
    }
}

/// Axum middleware applying [`decide`] to every request.
pub async fn session_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let decision = decide(
        request.uri().path(),
        session_token(&jar, &state.config.session),
        &state.config.gate,
    );

    match decision {
        GateDecision::Pass => next.run(request).await,
        GateDecision::RedirectToLogin => {
            tracing::debug!(path = %request.uri().path(), "No session cookie, redirecting to login");
            Redirect::temporary(&state.config.gate.login_path).into_response()
        }
    }
}
