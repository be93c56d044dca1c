//! Storage collaborator for the activity recorder.
//!
//! [`ActivityStore`] is the seam between the recorder and the row store. The
//! Postgres implementation delegates to [`ActivityRepo`]; the in-memory one
//! backs tests and local runs without a database.

use async_trait::async_trait;
use aurora_core::activity::NewActivity;
use aurora_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::activity::ActivityRecord;
use crate::repositories::ActivityRepo;
use crate::DbPool;

/// Parameterized insert and select-by-id over the `activity_logs` schema.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Insert a new row and return its server-assigned id.
    async fn insert(&self, input: &NewActivity) -> Result<DbId, sqlx::Error>;

    /// Read a row back by id. `Ok(None)` means no such row.
    async fn find_by_id(&self, id: DbId) -> Result<Option<ActivityRecord>, sqlx::Error>;

    /// A user's most recent rows, newest first.
    async fn list_for_user(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`ActivityStore`] backed by the `activity_logs` table.
#[derive(Clone)]
pub struct PgActivityStore {
    pool: DbPool,
}

impl PgActivityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn insert(&self, input: &NewActivity) -> Result<DbId, sqlx::Error> {
        ActivityRepo::insert(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ActivityRecord>, sqlx::Error> {
        ActivityRepo::find_by_id(&self.pool, id).await
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, sqlx::Error> {
        ActivityRepo::list_for_user(&self.pool, user_id, limit).await
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`ActivityStore`] kept in process memory.
///
/// Ids start at 1 and increase monotonically; inserts are serialized by an
/// internal mutex.
#[derive(Default)]
pub struct MemoryActivityStore {
    rows: Mutex<Vec<ActivityRecord>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored so far.
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn insert(&self, input: &NewActivity) -> Result<DbId, sqlx::Error> {
        let mut rows = self.rows.lock().await;
        let id = rows.len() as DbId + 1;
        rows.push(ActivityRecord {
            id,
            user_id: input.user_id,
            activity_type: input.activity_type.clone(),
            status: input.status.clone(),
            description: input.description.clone(),
            amount_cents: input.amount_cents,
            currency: input.currency.clone(),
            source: input.source.clone(),
            ip: input.ip.clone(),
            user_agent: input.user_agent.clone(),
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ActivityRecord>, sqlx::Error> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, sqlx::Error> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_assigns_increasing_ids() {
        let store = MemoryActivityStore::new();
        let first = store.insert(&NewActivity::new(1, "login", "completed")).await.unwrap();
        let second = store.insert(&NewActivity::new(1, "logout", "completed")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn memory_store_round_trips_fields() {
        let store = MemoryActivityStore::new();
        let input = NewActivity::new(42, "deposit", "completed").with_amount(5000, "USD");
        let id = store.insert(&input).await.unwrap();

        let row = store.find_by_id(id).await.unwrap().expect("row should exist");
        assert_eq!(row.id, id);
        assert_eq!(row.user_id, 42);
        assert_eq!(row.activity_type, "deposit");
        assert_eq!(row.status, "completed");
        assert_eq!(row.amount_cents, Some(5000));
        assert_eq!(row.currency.as_deref(), Some("USD"));
        assert!(row.description.is_none());
        assert!(row.source.is_none());
        assert!(row.ip.is_none());
        assert!(row.user_agent.is_none());
    }

    #[tokio::test]
    async fn memory_store_unknown_id_is_none() {
        let store = MemoryActivityStore::new();
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_store_lists_newest_first_per_user() {
        let store = MemoryActivityStore::new();
        store.insert(&NewActivity::new(1, "a", "completed")).await.unwrap();
        store.insert(&NewActivity::new(2, "b", "completed")).await.unwrap();
        store.insert(&NewActivity::new(1, "c", "completed")).await.unwrap();
        store.insert(&NewActivity::new(1, "d", "completed")).await.unwrap();

        let rows = store.list_for_user(1, 2).await.unwrap();
        let types: Vec<_> = rows.iter().map(|r| r.activity_type.as_str()).collect();
        assert_eq!(types, ["d", "c"]);
    }
}
