//! Activity log entity model.
//!
//! Activity rows are immutable once created (no `updated_at`).

use aurora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
///
/// Serializes with `type` as the key for `activity_type` and `null` for
/// every absent optional field.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub activity_type: String,
    pub status: String,
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub source: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}
