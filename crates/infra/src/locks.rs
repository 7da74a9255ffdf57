//! Per-account serialization of mutation sequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use hearth_core::AccountId;

/// One async mutex per account.
///
/// Holding the guard across load → mutate → save keeps two requests for the
/// same account from interleaving; different accounts never contend. Slots
/// nobody holds or waits on are dropped on the next `lock` call.
#[derive(Debug, Default)]
pub struct AccountLocks {
    slots: Mutex<HashMap<AccountId, Arc<AsyncMutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots.entry(account_id).or_default().clone()
        };
        slot.lock_owned().await
    }
}
