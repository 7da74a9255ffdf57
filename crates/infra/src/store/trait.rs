use std::sync::Arc;

use thiserror::Error;

use hearth_auth::Account;
use hearth_core::{AccountId, GuildId};
use hearth_inventory::{Guild, Inventory, Loadout};

/// Aggregate store operation error.
///
/// Infrastructure failures only; a missing document is `Ok(None)`, not an
/// error, so callers decide what "absent" means for their flow.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend failure in {operation}: {message}")]
    Backend { operation: &'static str, message: String },

    #[error("stored {kind} document could not be decoded: {message}")]
    Decode { kind: &'static str, message: String },

    #[error("{kind} document could not be encoded: {message}")]
    Encode { kind: &'static str, message: String },

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Document-store boundary for accounts and their aggregates.
///
/// Each save replaces the whole document (last write wins); there is no
/// version check.
#[async_trait::async_trait]
pub trait AggregateStore: Send + Sync {
    async fn load_account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;
    async fn save_account(&self, account: &Account) -> Result<(), StoreError>;

    async fn load_inventory(&self, owner: AccountId) -> Result<Option<Inventory>, StoreError>;
    async fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError>;

    /// Loadouts are addressed by their owner, not their own id.
    async fn load_loadout(&self, owner: AccountId) -> Result<Option<Loadout>, StoreError>;
    async fn save_loadout(&self, loadout: &Loadout) -> Result<(), StoreError>;

    async fn load_guild(&self, id: GuildId) -> Result<Option<Guild>, StoreError>;
    async fn save_guild(&self, guild: &Guild) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> AggregateStore for Arc<S>
where
    S: AggregateStore + ?Sized,
{
    async fn load_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        (**self).load_account(id).await
    }

    async fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        (**self).save_account(account).await
    }

    async fn load_inventory(&self, owner: AccountId) -> Result<Option<Inventory>, StoreError> {
        (**self).load_inventory(owner).await
    }

    async fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError> {
        (**self).save_inventory(inventory).await
    }

    async fn load_loadout(&self, owner: AccountId) -> Result<Option<Loadout>, StoreError> {
        (**self).load_loadout(owner).await
    }

    async fn save_loadout(&self, loadout: &Loadout) -> Result<(), StoreError> {
        (**self).save_loadout(loadout).await
    }

    async fn load_guild(&self, id: GuildId) -> Result<Option<Guild>, StoreError> {
        (**self).load_guild(id).await
    }

    async fn save_guild(&self, guild: &Guild) -> Result<(), StoreError> {
        (**self).save_guild(guild).await
    }
}
