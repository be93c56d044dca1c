//! Per-user ordering lock for the recorder.
//!
//! Holding a [`SequenceGuard`] across insert, read-back, and publish makes a
//! user's publish order equal to their insert completion order. Locks for
//! different users are independent. A user's entry is removed once no guard
//! is held or awaited for it, including waits that were cancelled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use aurora_core::types::DbId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A user's lock and the number of holders plus waiters.
struct UserLock {
    lock: Arc<AsyncMutex<()>>,
    interested: usize,
}

type LockMap = HashMap<DbId, UserLock>;

#[derive(Clone, Default)]
pub(crate) struct UserSequencer {
    locks: Arc<Mutex<LockMap>>,
}

impl UserSequencer {
    /// Wait until no other guard for `user_id` is held, then take one.
    pub(crate) async fn acquire(&self, user_id: DbId) -> SequenceGuard {
        let (lock, interest) = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            let entry = locks.entry(user_id).or_insert_with(|| UserLock {
                lock: Arc::default(),
                interested: 0,
            });
            entry.interested += 1;
            (
                Arc::clone(&entry.lock),
                Interest {
                    user_id,
                    locks: Arc::clone(&self.locks),
                },
            )
        };

        SequenceGuard {
            _guard: lock.lock_owned().await,
            _interest: interest,
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Counts one holder or waiter for a user; dropping it releases the entry
/// when it was the last one.
struct Interest {
    user_id: DbId,
    locks: Arc<Mutex<LockMap>>,
}

impl Drop for Interest {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = locks.get_mut(&self.user_id) {
            entry.interested -= 1;
            if entry.interested == 0 {
                locks.remove(&self.user_id);
            }
        }
    }
}

/// Fields drop in order: the user lock is released before the entry is
/// given up.
pub(crate) struct SequenceGuard {
    _guard: OwnedMutexGuard<()>,
    _interest: Interest,
}
