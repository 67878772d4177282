//! Per-member serialization of holder role updates.
//!
//! A role update reads the stored assignment, calls Discord and then writes the new
//! assignment. Two updates for the same member must not interleave, so on-demand
//! verification and reconciliation both take the member's lock for the whole
//! upsert, total, resolve and apply sequence.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-(guild, user) locks shared by every update path.
#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<(u64, u64), Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a member's holder state.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn lock(&self, guild_id: u64, user_id: u64) -> OwnedMutexGuard<()> {
        let user_lock = {
            let mut locks = self.locks.lock().await;
            // Entries only referenced by the map have no holder or waiter.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((guild_id, user_id))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        user_lock.lock_owned().await
    }
}
