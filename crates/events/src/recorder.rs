//! Log-then-notify activity recording.
//!
//! [`ActivityRecorder::record`] writes one immutable row, reads it back by
//! id, and publishes the read-back row on the [`ActivityHub`]. Subscribers and
//! the caller therefore always see the stored values, including the
//! server-assigned `id` and `created_at`.

use std::sync::Arc;

use aurora_core::activity::NewActivity;
use aurora_core::types::DbId;
use aurora_db::models::activity::ActivityRecord;
use aurora_db::ActivityStore;
use validator::Validate;

use crate::hub::ActivityHub;
use crate::sequencer::UserSequencer;

/// Why a `record` call failed. Apart from `Interrupted`, no publish happens
/// for any of these.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Mandatory fields missing or out of range; nothing was written.
    #[error("Invalid activity: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    /// The insert itself failed; nothing was written.
    #[error("Failed to insert activity: {0}")]
    Insert(#[source] sqlx::Error),

    /// The row was inserted but could not be read back.
    #[error("Failed to read back activity {id}: {source}")]
    ReadBack {
        id: DbId,
        #[source]
        source: sqlx::Error,
    },

    /// The row was inserted but the read-back found nothing.
    #[error("Activity {id} missing after insert")]
    Missing { id: DbId },

    /// The recording task panicked or was aborted by runtime shutdown.
    #[error("Activity recording interrupted: {0}")]
    Interrupted(#[source] tokio::task::JoinError),
}

/// Records user activity and notifies live listeners.
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
    hub: Arc<ActivityHub>,
    sequencer: UserSequencer,
}

impl ActivityRecorder {
    pub fn new(store: Arc<dyn ActivityStore>, hub: Arc<ActivityHub>) -> Self {
        Self {
            store,
            hub,
            sequencer: UserSequencer::default(),
        }
    }

    /// Persist `input`, re-read it, publish the stored row, and return it.
    ///
    /// Calls for the same user are serialized from insert through publish,
    /// so each listener sees that user's records in insert order. A broken
    /// listener never fails the call.
    ///
    /// Once validation passes the work runs on its own task: dropping the
    /// returned future does not stop a row that is being stored from being
    /// published.
    pub async fn record(&self, input: NewActivity) -> Result<ActivityRecord, RecordError> {
        input.validate()?;

        let store = Arc::clone(&self.store);
        let hub = Arc::clone(&self.hub);
        let sequencer = self.sequencer.clone();

        tokio::spawn(async move {
            let _sequence = sequencer.acquire(input.user_id).await;
            store_and_publish(store.as_ref(), &hub, &input).await
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Activity recording task failed");
            RecordError::Interrupted(e)
        })?
    }

    /// A user's most recent activity, newest first.
    pub async fn recent(&self, user_id: DbId, limit: i64) -> Result<Vec<ActivityRecord>, sqlx::Error> {
        self.store.list_for_user(user_id, limit).await
    }

    pub fn hub(&self) -> &Arc<ActivityHub> {
        &self.hub
    }
}

/// Insert, read back, and publish one activity. The caller holds the user's
/// sequence guard.
async fn store_and_publish(
    store: &dyn ActivityStore,
    hub: &ActivityHub,
    input: &NewActivity,
) -> Result<ActivityRecord, RecordError> {
    let id = store.insert(input).await.map_err(|e| {
        tracing::error!(
            error = %e,
            user_id = input.user_id,
            activity_type = %input.activity_type,
            "Failed to insert activity"
        );
        RecordError::Insert(e)
    })?;

    let record = match store.find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::error!(id, user_id = input.user_id, "Activity missing after insert");
            return Err(RecordError::Missing { id });
        }
        Err(e) => {
            tracing::error!(error = %e, id, "Failed to read back activity");
            return Err(RecordError::ReadBack { id, source: e });
        }
    };

    let delivered = hub.publish(&record).await;
    tracing::debug!(
        id = record.id,
        user_id = record.user_id,
        activity_type = %record.activity_type,
        delivered,
        "Activity recorded"
    );

    Ok(record)
}
