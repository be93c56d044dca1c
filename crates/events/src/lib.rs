//! Aurora activity feed: log-then-notify.
//!
//! - [`ActivityHub`]: in-process per-user publish/subscribe registry.
//! - [`ActivityRecorder`]: persists an activity, re-reads it, and publishes
//!   the stored row to the user's live subscribers.

pub mod hub;
pub mod recorder;
mod sequencer;

pub use hub::{ActivityHub, ActivitySubscription, ListenerHandle};
pub use recorder::{ActivityRecorder, RecordError};
