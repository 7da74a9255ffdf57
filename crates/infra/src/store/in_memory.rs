use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

use hearth_auth::Account;
use hearth_core::{AccountId, GuildId};
use hearth_inventory::{Guild, Inventory, Loadout};

use super::r#trait::{AggregateStore, StoreError};

/// In-memory aggregate store.
///
/// Intended for tests/dev. Documents are cloned in and out, so callers never
/// share state with the store.
#[derive(Debug, Default)]
pub struct InMemoryAggregateStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    inventories: RwLock<HashMap<AccountId, Inventory>>,
    loadouts: RwLock<HashMap<AccountId, Loadout>>,
    guilds: RwLock<HashMap<GuildId, Guild>>,
}

impl InMemoryAggregateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<K: Eq + Hash, V: Clone>(map: &RwLock<HashMap<K, V>>, key: &K) -> Result<Option<V>, StoreError> {
    let map = map.read().map_err(|_| StoreError::LockPoisoned)?;
    Ok(map.get(key).cloned())
}

fn write<K: Eq + Hash, V>(map: &RwLock<HashMap<K, V>>, key: K, value: V) -> Result<(), StoreError> {
    let mut map = map.write().map_err(|_| StoreError::LockPoisoned)?;
    map.insert(key, value);
    Ok(())
}

#[async_trait::async_trait]
impl AggregateStore for InMemoryAggregateStore {
    async fn load_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        read(&self.accounts, &id)
    }

    async fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        write(&self.accounts, account.id, account.clone())
    }

    async fn load_inventory(&self, owner: AccountId) -> Result<Option<Inventory>, StoreError> {
        read(&self.inventories, &owner)
    }

    async fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError> {
        write(&self.inventories, inventory.account_owner_id, inventory.clone())
    }

    async fn load_loadout(&self, owner: AccountId) -> Result<Option<Loadout>, StoreError> {
        read(&self.loadouts, &owner)
    }

    async fn save_loadout(&self, loadout: &Loadout) -> Result<(), StoreError> {
        write(&self.loadouts, loadout.owner, loadout.clone())
    }

    async fn load_guild(&self, id: GuildId) -> Result<Option<Guild>, StoreError> {
        read(&self.guilds, &id)
    }

    async fn save_guild(&self, guild: &Guild) -> Result<(), StoreError> {
        write(&self.guilds, guild.id, guild.clone())
    }
}
