//! Flow execution pipeline (application-level orchestration).
//!
//! `InventoryService` wraps every flow from `hearth_inventory::flows` in the
//! same pipeline:
//!
//! ```text
//! request
//!   ↓
//! 1. Take the account's lock (serializes requests per account)
//!   ↓
//! 2. Load the aggregates the flow needs (absent → NotFound)
//!   ↓
//! 3. Run the flow against the in-memory handles (pure, no IO)
//!   ↓
//! 4. Save each touched aggregate once
//!   ↓
//! response body
//! ```
//!
//! A flow that fails at step 3 leaves the store untouched: nothing is saved
//! before the flow has produced its full response.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::instrument;

use hearth_auth::{Account, AuthError, Credentials, verify_credentials};
use hearth_core::{AccountId, DomainError, DomainResult};
use hearth_inventory::flows::{
    self, ClaimRecipe, ClaimRecipeResponse, CreateGuildRequest, ItemLists, LoadoutSection, SaveLoadoutOutcome,
    SaveLoadoutRequest, StartRecipeResponse, StatsView, SyndicateSacrificeRequest, SyndicateSacrificeResponse,
};
use hearth_inventory::{
    AcquisitionService, Guild, Inventory, InventoryChanges, ItemCatalog, StoreItemAcquisition, SyndicateCatalog,
    TypeCount,
};

use crate::locks::AccountLocks;
use crate::store::{AggregateStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Runs inventory flows against an [`AggregateStore`].
pub struct InventoryService<S> {
    store: S,
    items: Arc<dyn ItemCatalog>,
    syndicates: Arc<dyn SyndicateCatalog>,
    acquisition: Arc<dyn AcquisitionService>,
    locks: AccountLocks,
}

impl<S> InventoryService<S>
where
    S: AggregateStore,
{
    /// Build a service whose item and syndicate lookups come from one catalog.
    pub fn new<C>(store: S, catalog: Arc<C>) -> Self
    where
        C: ItemCatalog + SyndicateCatalog + 'static,
    {
        let items: Arc<dyn ItemCatalog> = catalog.clone();
        let acquisition = Arc::new(StoreItemAcquisition::new(items.clone()));
        Self {
            store,
            items,
            syndicates: catalog,
            acquisition,
            locks: AccountLocks::new(),
        }
    }

    /// Replace the reward-granting collaborator.
    pub fn with_acquisition(mut self, acquisition: Arc<dyn AcquisitionService>) -> Self {
        self.acquisition = acquisition;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve request credentials to an account id.
    pub async fn authenticate(&self, credentials: &Credentials) -> ServiceResult<AccountId> {
        let account_id = credentials.account_id()?;
        let account = self.store.load_account(account_id).await?;
        Ok(verify_credentials(credentials, account.as_ref())?)
    }

    /// Create an account with an empty inventory and loadout.
    #[instrument(skip(self), err)]
    pub async fn create_account(&self, email: &str) -> ServiceResult<Account> {
        let account = Account::new(email);
        let (inventory, loadout) = flows::provision(account.id);

        self.store.save_account(&account).await?;
        self.store.save_loadout(&loadout).await?;
        self.store.save_inventory(&inventory).await?;

        tracing::info!(account_id = %account.id, "account created");
        Ok(account)
    }

    async fn load_inventory(&self, account_id: AccountId) -> ServiceResult<Inventory> {
        self.store
            .load_inventory(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("inventory for account {account_id}")).into())
    }

    /// Lock → load inventory → run `flow` → save inventory.
    async fn mutate_inventory<R>(
        &self,
        account_id: AccountId,
        flow: impl FnOnce(&mut Inventory) -> DomainResult<R>,
    ) -> ServiceResult<R> {
        let _guard = self.locks.lock(account_id).await;
        let mut inventory = self.load_inventory(account_id).await?;
        let response = flow(&mut inventory)?;
        self.store.save_inventory(&inventory).await?;
        Ok(response)
    }

    #[instrument(skip(self), fields(account_id = %account_id), err)]
    pub async fn claim_completed_recipe(
        &self,
        account_id: AccountId,
        claim: ClaimRecipe,
    ) -> ServiceResult<ClaimRecipeResponse> {
        let items = self.items.clone();
        self.mutate_inventory(account_id, |inventory| {
            flows::claim_recipe(inventory, items.as_ref(), claim)
        })
        .await
    }

    #[instrument(skip(self), fields(account_id = %account_id), err)]
    pub async fn start_recipe(&self, account_id: AccountId, recipe_name: &str) -> ServiceResult<StartRecipeResponse> {
        let items = self.items.clone();
        self.mutate_inventory(account_id, |inventory| {
            flows::start_recipe(inventory, items.as_ref(), recipe_name, Utc::now())
        })
        .await
    }

    #[instrument(skip(self, request), fields(account_id = %account_id, tag = %request.affiliation_tag), err)]
    pub async fn syndicate_sacrifice(
        &self,
        account_id: AccountId,
        request: &SyndicateSacrificeRequest,
    ) -> ServiceResult<SyndicateSacrificeResponse> {
        let syndicates = self.syndicates.clone();
        let acquisition = self.acquisition.clone();
        self.mutate_inventory(account_id, |inventory| {
            flows::sacrifice(inventory, syndicates.as_ref(), acquisition.as_ref(), request)
        })
        .await
    }

    #[instrument(skip(self, entries), fields(account_id = %account_id, entries = entries.len()), err)]
    pub async fn add_items(&self, account_id: AccountId, entries: &[TypeCount]) -> ServiceResult<InventoryChanges> {
        let items = self.items.clone();
        self.mutate_inventory(account_id, |inventory| {
            flows::add_items(inventory, items.as_ref(), entries)
        })
        .await
    }

    /// Apply a save-loadout batch. The loadout aggregate is only loaded (and
    /// saved) when the batch touches `LoadOuts`.
    #[instrument(skip(self, request), fields(account_id = %account_id), err)]
    pub async fn save_loadout(
        &self,
        account_id: AccountId,
        request: SaveLoadoutRequest,
    ) -> ServiceResult<SaveLoadoutOutcome> {
        let sections = flows::parse_sections(request)?;
        let needs_loadout = sections
            .iter()
            .any(|s| matches!(s, LoadoutSection::LoadOuts(_)));

        let _guard = self.locks.lock(account_id).await;
        let mut inventory = self.load_inventory(account_id).await?;
        let mut loadout = if needs_loadout {
            self.store.load_loadout(account_id).await?
        } else {
            None
        };

        let outcome = flows::save_loadout(&mut inventory, loadout.as_mut(), sections)?;

        if let Some(loadout) = loadout.as_ref().filter(|_| outcome.loadout_changed) {
            self.store.save_loadout(loadout).await?;
        }
        self.store.save_inventory(&inventory).await?;
        Ok(outcome)
    }

    #[instrument(skip(self, request), fields(account_id = %account_id), err)]
    pub async fn create_guild(&self, account_id: AccountId, request: &CreateGuildRequest) -> ServiceResult<Guild> {
        let _guard = self.locks.lock(account_id).await;
        let mut inventory = self.load_inventory(account_id).await?;

        let guild = flows::create_guild(&mut inventory, request)?;

        self.store.save_guild(&guild).await?;
        self.store.save_inventory(&inventory).await?;
        Ok(guild)
    }

    /// Full inventory document, after running the daily reset if due.
    #[instrument(skip(self), fields(account_id = %account_id), err)]
    pub async fn inventory_view(&self, account_id: AccountId) -> ServiceResult<JsonValue> {
        let _guard = self.locks.lock(account_id).await;
        let mut account = self
            .store
            .load_account(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("account {account_id}")))?;
        let mut inventory = self.load_inventory(account_id).await?;

        let today = flows::day_number(Utc::now());
        if flows::apply_daily_reset(&mut inventory, account.last_login_day, today) {
            account.last_login_day = Some(today);
            self.store.save_account(&account).await?;
            self.store.save_inventory(&inventory).await?;
        }

        let loadout = self.store.load_loadout(account_id).await?;
        Ok(flows::inventory_view(&inventory, loadout.as_ref())?)
    }

    pub async fn stats_view(&self, account_id: AccountId) -> ServiceResult<StatsView> {
        let inventory = self.load_inventory(account_id).await?;
        Ok(flows::stats_view(&inventory))
    }

    /// Catalog items grouped for the item picker. Touches no aggregate.
    pub fn item_lists(&self) -> ItemLists {
        flows::item_lists(self.items.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_inventory::{CountedKind, RecipeDefinition, StaticCatalog};

    use crate::store::InMemoryAggregateStore;

    fn service() -> InventoryService<Arc<InMemoryAggregateStore>> {
        let catalog = Arc::new(StaticCatalog::builtin().unwrap());
        InventoryService::new(Arc::new(InMemoryAggregateStore::new()), catalog)
    }

    #[tokio::test]
    async fn flows_require_a_provisioned_inventory() {
        let svc = service();
        let err = svc
            .add_items(AccountId::new(), &[TypeCount::new("/Lotus/Types/Items/MiscItems/Ferrite", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn failed_flow_persists_nothing() {
        let svc = service();
        let account = svc.create_account("tenno@example.com").await.unwrap();
        svc.add_items(account.id, &[TypeCount::new("/Lotus/Types/Items/MiscItems/Ferrite", 10)])
            .await
            .unwrap();

        let err = svc
            .add_items(
                account.id,
                &[
                    TypeCount::new("/Lotus/Types/Items/MiscItems/Ferrite", 5),
                    TypeCount::new("/Lotus/Types/Nope", 1),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::UnknownItemType(_))));

        let stored = svc.store().load_inventory(account.id).await.unwrap().unwrap();
        assert_eq!(stored.misc_items.count("/Lotus/Types/Items/MiscItems/Ferrite"), 10);
    }

    #[tokio::test]
    async fn claim_failing_after_removal_keeps_the_pending_recipe() {
        let catalog = StaticCatalog::builtin().unwrap().with_recipe(
            "/Recipes/Orphan",
            RecipeDefinition {
                result_type: "/Items/NotInCatalog".into(),
                num: 1,
                build_price: 0,
                build_time: 0,
                skip_build_time_price: 0,
                consume_on_use: true,
                ingredients: vec![],
            },
        );
        let svc = InventoryService::new(Arc::new(InMemoryAggregateStore::new()), Arc::new(catalog));
        let account = svc.create_account("tenno@example.com").await.unwrap();
        let started = svc.start_recipe(account.id, "/Recipes/Orphan").await.unwrap();
        let before = svc.store().load_inventory(account.id).await.unwrap().unwrap();

        let err = svc
            .claim_completed_recipe(
                account.id,
                ClaimRecipe {
                    recipe_id: started.recipe_id,
                    cancel: false,
                    rush: true,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::UnknownItemType(_))));

        let stored = svc.store().load_inventory(account.id).await.unwrap().unwrap();
        assert_eq!(stored, before);
        assert!(stored.pending_recipes.contains(&started.recipe_id));
    }

    #[tokio::test]
    async fn authenticate_checks_the_nonce() {
        let svc = service();
        let account = svc.create_account("tenno@example.com").await.unwrap();

        let good = Credentials {
            account_id: account.id.to_string(),
            nonce: account.nonce.to_string(),
        };
        assert_eq!(svc.authenticate(&good).await.unwrap(), account.id);

        let bad = Credentials {
            nonce: "12345".into(),
            ..good
        };
        assert!(matches!(svc.authenticate(&bad).await, Err(ServiceError::Auth(_))));
    }

    #[tokio::test]
    async fn guild_creation_saves_both_aggregates() {
        let svc = service();
        let account = svc.create_account("tenno@example.com").await.unwrap();

        let guild = svc
            .create_guild(
                account.id,
                &CreateGuildRequest {
                    guild_name: "Hearthguard".into(),
                },
            )
            .await
            .unwrap();

        let stored_guild = svc.store().load_guild(guild.id).await.unwrap();
        assert_eq!(stored_guild, Some(guild.clone()));
        let inventory = svc.store().load_inventory(account.id).await.unwrap().unwrap();
        assert_eq!(inventory.guild_id, Some(guild.id));
        assert_eq!(inventory.counted(CountedKind::LevelKeys).count(flows::guild::DOJO_KEY), 1);
    }
}
