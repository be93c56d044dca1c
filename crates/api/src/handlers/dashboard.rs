//! Handlers for the protected dashboard area.
//!
//! Page rendering lives in the frontend; these handlers return the JSON the
//! dashboard shell needs.

use aurora_core::activity::{activity_sources, activity_statuses, activity_types, NewActivity};
use aurora_core::types::DbId;
use aurora_db::models::activity::ActivityRecord;
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::auth::cookie::{session_removal, session_token};
use crate::auth::session::verify_session_token;
use crate::error::AppResult;
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of activity records shown on the dashboard home.
const HOME_ACTIVITY_LIMIT: i64 = 10;

/// Body of `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardHome {
    pub user_id: DbId,
    pub recent_activity: Vec<ActivityRecord>,
}

/// Body of `GET /dashboard/login`.
#[derive(Debug, Serialize)]
pub struct LoginPrompt {
    pub status: &'static str,
    pub login_url: String,
}

/// GET /dashboard
pub async fn home(
    State(state): State<AppState>,
    session: AuthSession,
) -> AppResult<Json<DataResponse<DashboardHome>>> {
    let recent_activity = state
        .recorder
        .recent(session.user_id, HOME_ACTIVITY_LIMIT)
        .await?;

    Ok(Json(DataResponse {
        data: DashboardHome {
            user_id: session.user_id,
            recent_activity,
        },
    }))
}

/// GET /dashboard/login
///
/// Landing point for unauthenticated requests; points at the external login
/// flow.
pub async fn login(State(state): State<AppState>) -> Json<LoginPrompt> {
    Json(LoginPrompt {
        status: "login_required",
        login_url: state.config.login_url.clone(),
    })
}

/// GET /dashboard/logout
///
/// Records a `logout` activity when the session is valid, expires the
/// session cookie, and redirects to the site root. Recording failures are
/// logged and never block the logout.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let session = &state.config.session;
    let user_id = verify_session_token(session_token(&jar, session), session)
        .ok()
        .and_then(|claims| claims.user_id());

    if let Some(user_id) = user_id {
        let activity = NewActivity::new(
            user_id,
            activity_types::LOGOUT,
            activity_statuses::COMPLETED,
        )
        .with_source(activity_sources::WEB)
        .with_client(client_ip(&headers), header_string(&headers, USER_AGENT.as_str()));

        if let Err(e) = state.recorder.record(activity).await {
            tracing::warn!(error = %e, user_id, "Failed to record logout activity");
        }
    }

    (jar.add(session_removal(session)), Redirect::to("/")).into_response()
}

/// Originating client address as reported by the reverse proxy.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_string(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_string(headers, "x-real-ip"))
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
