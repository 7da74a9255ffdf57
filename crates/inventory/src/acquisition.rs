//! Reward/purchase granting.

use std::sync::Arc;

use hearth_core::DomainResult;

use crate::catalog::ItemCatalog;
use crate::changes::InventoryChanges;
use crate::inventory::Inventory;
use crate::primitives::add_item;

const STORE_ITEM_PREFIX: &str = "/Lotus/StoreItems/";

/// Grants a store/reward item to an inventory.
pub trait AcquisitionService: Send + Sync {
    fn grant(&self, item_type: &str, inventory: &mut Inventory) -> DomainResult<InventoryChanges>;
}

impl<A> AcquisitionService for Arc<A>
where
    A: AcquisitionService + ?Sized,
{
    fn grant(&self, item_type: &str, inventory: &mut Inventory) -> DomainResult<InventoryChanges> {
        (**self).grant(item_type, inventory)
    }
}

/// Resolves store-item names to their in-game type and grants one unit.
#[derive(Clone)]
pub struct StoreItemAcquisition {
    catalog: Arc<dyn ItemCatalog>,
}

impl StoreItemAcquisition {
    pub fn new(catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { catalog }
    }
}

/// `/Lotus/StoreItems/Foo` → `/Lotus/Foo`; other names pass through.
pub fn store_item_to_item_type(item_type: &str) -> String {
    match item_type.strip_prefix(STORE_ITEM_PREFIX) {
        Some(rest) => format!("/Lotus/{rest}"),
        None => item_type.to_string(),
    }
}

impl AcquisitionService for StoreItemAcquisition {
    fn grant(&self, item_type: &str, inventory: &mut Inventory) -> DomainResult<InventoryChanges> {
        let resolved = store_item_to_item_type(item_type);
        add_item(inventory, self.catalog.as_ref(), &resolved, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemCategory, StaticCatalog};
    use crate::changes::CountedKind;
    use hearth_core::{AccountId, DomainError};

    #[test]
    fn store_names_are_mapped_before_lookup() {
        assert_eq!(
            store_item_to_item_type("/Lotus/StoreItems/Types/Items/MiscItems/SyndicateSigilNewLoka"),
            "/Lotus/Types/Items/MiscItems/SyndicateSigilNewLoka"
        );
        assert_eq!(store_item_to_item_type("/Lotus/Types/Keys/DojoKey"), "/Lotus/Types/Keys/DojoKey");
    }

    #[test]
    fn grant_adds_one_unit_of_the_resolved_item() {
        let catalog = StaticCatalog::new().with_item(
            "/Lotus/Types/Items/MiscItems/SyndicateSigilNewLoka",
            ItemCategory::Counted(CountedKind::MiscItems),
        );
        let acquisition = StoreItemAcquisition::new(Arc::new(catalog));
        let mut inventory = Inventory::new(AccountId::new());

        let changes = acquisition
            .grant("/Lotus/StoreItems/Types/Items/MiscItems/SyndicateSigilNewLoka", &mut inventory)
            .unwrap();

        assert_eq!(changes.counted(CountedKind::MiscItems).len(), 1);
        assert_eq!(
            inventory.misc_items.count("/Lotus/Types/Items/MiscItems/SyndicateSigilNewLoka"),
            1
        );
    }

    #[test]
    fn unknown_reward_surfaces_unknown_item_type() {
        let acquisition = StoreItemAcquisition::new(Arc::new(StaticCatalog::new()));
        let mut inventory = Inventory::new(AccountId::new());

        let err = acquisition.grant("/Lotus/StoreItems/Nothing", &mut inventory).unwrap_err();
        assert!(matches!(err, DomainError::UnknownItemType(t) if t == "/Lotus/Nothing"));
    }
}
