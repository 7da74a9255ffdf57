//! Inventory mutation engine.
//!
//! Aggregates (inventory, loadout, guild), the mutation primitives that change
//! them, the change-set combiner that summarizes those changes, and the flow
//! orchestrators that compose primitives per feature. Everything here is pure
//! domain logic: no IO, no HTTP, no storage.

pub mod acquisition;
pub mod catalog;
pub mod changes;
pub mod collection;
pub mod equipment;
pub mod flows;
pub mod guild;
pub mod inventory;
pub mod loadout;
pub mod primitives;

pub use acquisition::{AcquisitionService, StoreItemAcquisition};
pub use catalog::{
    CatalogError, CatalogItem, ItemCatalog, ItemCategory, RecipeDefinition, Sacrifice, StaticCatalog,
    SyndicateCatalog, SyndicateDefinition, SyndicateTitle,
};
pub use changes::{CountedKind, CurrencyKind, InventoryChanges};
pub use collection::{CountedItems, IdentityMap, TypeCount};
pub use equipment::{EquipmentCategory, EquipmentInventory, EquipmentItem, ItemConfig};
pub use guild::Guild;
pub use inventory::{Affiliation, DailyAllowances, Inventory, OperatorConfig, PendingRecipe, XpInfo};
pub use loadout::{Loadout, LoadoutConfig, LoadoutConfigPayload, LoadoutSlot, NewIdAllocation};
