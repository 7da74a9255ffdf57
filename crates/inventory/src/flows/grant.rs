//! Bulk item grants (developer/admin surface).

use hearth_core::DomainResult;

use crate::catalog::ItemCatalog;
use crate::changes::InventoryChanges;
use crate::collection::TypeCount;
use crate::inventory::Inventory;
use crate::primitives::add_item;

/// Grant every entry by catalog type. The first unknown type aborts the batch.
pub fn add_items(
    inventory: &mut Inventory,
    catalog: &dyn ItemCatalog,
    entries: &[TypeCount],
) -> DomainResult<InventoryChanges> {
    let mut changes = InventoryChanges::new();
    for entry in entries {
        changes.merge(add_item(inventory, catalog, &entry.item_type, entry.item_count)?);
    }
    Ok(changes)
}
