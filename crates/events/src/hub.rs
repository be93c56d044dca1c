//! Per-user activity fan-out.
//!
//! [`ActivityHub`] maps a user id to the set of live listeners interested in
//! that user's activity stream. Each listener owns an unbounded channel, so a
//! publish never waits on a slow consumer. Designed to be shared via
//! `Arc<ActivityHub>`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use aurora_core::types::DbId;
use aurora_db::models::activity::ActivityRecord;
use tokio::sync::{mpsc, RwLock};

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    pub user_id: DbId,
    pub id: u64,
}

/// Receiving side of a registration returned by [`ActivityHub::subscribe`].
///
/// Only records published after the subscription was created are delivered.
pub struct ActivitySubscription {
    handle: ListenerHandle,
    receiver: mpsc::UnboundedReceiver<ActivityRecord>,
}

impl ActivitySubscription {
    pub fn handle(&self) -> ListenerHandle {
        self.handle
    }

    /// Wait for the next record. Returns `None` once the listener has been
    /// unsubscribed and every buffered record has been drained.
    pub async fn recv(&mut self) -> Option<ActivityRecord> {
        self.receiver.recv().await
    }

    /// Take a buffered record without waiting.
    pub fn try_recv(&mut self) -> Option<ActivityRecord> {
        self.receiver.try_recv().ok()
    }
}

type Listeners = HashMap<u64, mpsc::UnboundedSender<ActivityRecord>>;

/// In-process subscription registry keyed by user id.
///
/// No persistence and no backlog: a listener added after a publish never sees
/// that record.
pub struct ActivityHub {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<DbId, Listeners>>,
}

impl ActivityHub {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new listener for `user_id`.
    pub async fn subscribe(&self, user_id: DbId) -> ActivitySubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .write()
            .await
            .entry(user_id)
            .or_default()
            .insert(id, tx);

        tracing::debug!(user_id, listener_id = id, "Activity listener subscribed");
        ActivitySubscription {
            handle: ListenerHandle { user_id, id },
            receiver: rx,
        }
    }

    /// Remove a listener. Unknown handles are a no-op.
    pub async fn unsubscribe(&self, handle: ListenerHandle) {
        let mut listeners = self.listeners.write().await;
        if let Some(user_listeners) = listeners.get_mut(&handle.user_id) {
            if user_listeners.remove(&handle.id).is_some() {
                tracing::debug!(
                    user_id = handle.user_id,
                    listener_id = handle.id,
                    "Activity listener unsubscribed"
                );
            }
            if user_listeners.is_empty() {
                listeners.remove(&handle.user_id);
            }
        }
    }

    /// Deliver `record` to every listener registered for `record.user_id`.
    ///
    /// Never blocks and never fails. Listeners whose receiving side is gone
    /// are pruned; the others still get the record. Returns the number of
    /// listeners the record was delivered to.
    pub async fn publish(&self, record: &ActivityRecord) -> usize {
        let mut closed = Vec::new();
        let mut delivered = 0;

        {
            let listeners = self.listeners.read().await;
            let Some(user_listeners) = listeners.get(&record.user_id) else {
                return 0;
            };
            for (id, sender) in user_listeners {
                match sender.send(record.clone()) {
                    Ok(()) => delivered += 1,
                    Err(_) => closed.push(*id),
                }
            }
        }

        if !closed.is_empty() {
            tracing::warn!(
                user_id = record.user_id,
                activity_id = record.id,
                closed = closed.len(),
                "Dropping closed activity listeners"
            );
            for id in closed {
                self.unsubscribe(ListenerHandle {
                    user_id: record.user_id,
                    id,
                })
                .await;
            }
        }

        delivered
    }

    /// Number of listeners currently registered for `user_id`.
    pub async fn listener_count(&self, user_id: DbId) -> usize {
        self.listeners
            .read()
            .await
            .get(&user_id)
            .map_or(0, HashMap::len)
    }

    /// Drop every listener. Their receivers drain and then return `None`.
    pub async fn close_all(&self) {
        let mut listeners = self.listeners.write().await;
        let count: usize = listeners.values().map(HashMap::len).sum();
        listeners.clear();
        tracing::info!(count, "Closed all activity listeners");
    }
}

impl Default for ActivityHub {
    fn default() -> Self {
        Self::new()
    }
}
