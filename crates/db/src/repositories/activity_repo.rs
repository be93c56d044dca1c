//! Repository for the `activity_logs` table.

use aurora_core::activity::NewActivity;
use aurora_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::ActivityRecord;

/// Column list for SELECT queries.
const COLUMNS: &str = "\
    id, user_id, type, status, description, amount_cents, \
    currency, source, ip, user_agent, created_at";

/// Column list for INSERT (excludes the server-assigned `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    user_id, type, status, description, amount_cents, \
    currency, source, ip, user_agent";

/// Insert and query operations for activity records. There is no update or
/// delete: rows are append-only.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity row, returning the server-assigned id.
    pub async fn insert(pool: &PgPool, input: &NewActivity) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id"
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(input.user_id)
            .bind(&input.activity_type)
            .bind(&input.status)
            .bind(&input.description)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.source)
            .bind(&input.ip)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find an activity row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activity_logs WHERE id = $1");
        sqlx::query_as::<_, ActivityRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's most recent activity, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE user_id = $1
             ORDER BY id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
