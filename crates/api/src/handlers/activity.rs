//! Handlers for the `/activity` resource.

use aurora_core::error::CoreError;
use aurora_db::models::activity::ActivityRecord;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of records returned when no `limit` is given.
pub const DEFAULT_LIMIT: i64 = 20;
/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Query parameters for `GET /activity`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/activity
///
/// The session user's most recent activity, newest first.
pub async fn list(
    State(state): State<AppState>,
    session: AuthSession,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityRecord>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!("limit must be between 1 and {MAX_LIMIT}")).into());
    }

    let items = state.recorder.recent(session.user_id, limit).await?;
    Ok(Json(DataResponse { data: items }))
}
