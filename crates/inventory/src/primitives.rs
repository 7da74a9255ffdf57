//! Mutation primitives.
//!
//! Each primitive mutates the in-memory [`Inventory`] (or [`Loadout`]) and
//! returns the change-set fragment describing what it did. Nothing here
//! persists; the caller saves the aggregate once the whole flow succeeded.

use indexmap::IndexMap;

use hearth_core::{DomainError, DomainResult, Oid};

use crate::catalog::{ItemCatalog, ItemCategory};
use crate::changes::{CountedKind, CurrencyKind, InventoryChanges};
use crate::collection::TypeCount;
use crate::equipment::EquipmentItem;
use crate::inventory::Inventory;
use crate::loadout::{Loadout, LoadoutConfig, LoadoutConfigPayload, LoadoutSlot, NewIdAllocation};

/// Most copies of one equipment item a single grant may mint.
pub const MAX_EQUIPMENT_GRANT: i64 = 100;

fn out_of_range(what: &str) -> DomainError {
    DomainError::validation(format!("{what} out of range"))
}

fn checked_sum(current: i64, delta: i64, what: &str) -> DomainResult<i64> {
    current.checked_add(delta).ok_or_else(|| out_of_range(what))
}

/// Add a signed amount to regular credits or premium currency.
///
/// No clamping happens here. A premium debit spends free premium currency
/// first; the fragment then carries both the `PremiumCreditsFree` part and the
/// full `PremiumCredits` delta. A balance that would leave `i64` is rejected
/// before anything changes.
pub fn adjust_currency(inventory: &mut Inventory, amount: i64, premium: bool) -> DomainResult<InventoryChanges> {
    let mut changes = InventoryChanges::new();
    if amount == 0 {
        return Ok(changes);
    }

    if !premium {
        inventory.regular_credits = checked_sum(inventory.regular_credits, amount, "RegularCredits")?;
        changes.add_currency(CurrencyKind::RegularCredits, amount);
        return Ok(changes);
    }

    let premium_total = checked_sum(inventory.premium_credits, amount, "PremiumCredits")?;
    if amount < 0 && inventory.premium_credits_free > 0 {
        let from_free = amount.saturating_neg().min(inventory.premium_credits_free);
        inventory.premium_credits_free -= from_free;
        changes.add_currency(CurrencyKind::PremiumCreditsFree, -from_free);
    }
    inventory.premium_credits = premium_total;
    changes.add_currency(CurrencyKind::PremiumCredits, amount);
    Ok(changes)
}

/// Add a signed amount to any scalar currency.
pub fn add_currency(inventory: &mut Inventory, kind: CurrencyKind, amount: i64) -> DomainResult<InventoryChanges> {
    match kind {
        CurrencyKind::RegularCredits => adjust_currency(inventory, amount, false),
        CurrencyKind::PremiumCredits => adjust_currency(inventory, amount, true),
        _ => {
            let mut changes = InventoryChanges::new();
            if amount != 0 {
                let balance = inventory.currency_mut(kind);
                *balance = checked_sum(*balance, amount, kind.key())?;
                changes.add_currency(kind, amount);
            }
            Ok(changes)
        }
    }
}

/// Add (or, with negative counts, consume) stackable items of one kind.
///
/// Duplicate item types within `entries` are summed into one delta. Every
/// stack is range-checked before the first one is touched.
pub fn add_counted(
    inventory: &mut Inventory,
    kind: CountedKind,
    entries: &[TypeCount],
) -> DomainResult<InventoryChanges> {
    let mut summed: IndexMap<&str, i64> = IndexMap::new();
    for entry in entries {
        let total = summed.entry(entry.item_type.as_str()).or_insert(0);
        *total = checked_sum(*total, entry.item_count, &entry.item_type)?;
    }

    let collection = inventory.counted_mut(kind);
    for (item_type, delta) in &summed {
        checked_sum(collection.count(item_type), *delta, item_type)?;
    }

    let mut deltas = Vec::with_capacity(summed.len());
    for (item_type, delta) in summed {
        collection.add(item_type, delta)?;
        deltas.push(TypeCount::new(item_type, delta));
    }

    let mut changes = InventoryChanges::new();
    if !deltas.is_empty() {
        changes.extend_counted(kind, deltas);
    }
    Ok(changes)
}

pub fn add_misc_items(inventory: &mut Inventory, entries: &[TypeCount]) -> DomainResult<InventoryChanges> {
    add_counted(inventory, CountedKind::MiscItems, entries)
}

/// Blueprint counts (owned recipes, not crafts in progress).
pub fn add_recipes(inventory: &mut Inventory, entries: &[TypeCount]) -> DomainResult<InventoryChanges> {
    add_counted(inventory, CountedKind::Recipes, entries)
}

/// Grant `quantity` of an arbitrary catalog item, routed by its category.
///
/// Equipment grants mint one entry per copy and are limited to
/// [`MAX_EQUIPMENT_GRANT`] copies.
pub fn add_item(
    inventory: &mut Inventory,
    catalog: &dyn ItemCatalog,
    item_type: &str,
    quantity: i64,
) -> DomainResult<InventoryChanges> {
    let entry = catalog
        .item(item_type)
        .ok_or_else(|| DomainError::unknown_item_type(item_type))?;

    tracing::debug!(item_type, quantity, category = entry.category.key(), "granting item");

    match entry.category {
        ItemCategory::Currency(kind) => add_currency(inventory, kind, quantity),
        ItemCategory::Counted(kind) => add_counted(inventory, kind, &[TypeCount::new(item_type, quantity)]),
        ItemCategory::Equipment(category) => {
            if !(1..=MAX_EQUIPMENT_GRANT).contains(&quantity) {
                return Err(DomainError::validation(format!(
                    "cannot grant {quantity} of equipment {item_type} (1..={MAX_EQUIPMENT_GRANT})"
                )));
            }
            let collection = inventory.equipment.get_mut(category);
            let mut acquired = Vec::new();
            for _ in 0..quantity {
                let item = EquipmentItem::acquire(item_type);
                collection.insert(item.clone());
                acquired.push(item);
            }
            let mut changes = InventoryChanges::new();
            changes.extend_equipment(category, acquired);
            Ok(changes)
        }
    }
}

/// Identity-based upsert/delete of one loadout config.
///
/// - `remove`: delete the config stored under `slot_id`;
/// - absent: insert under the payload's id, or under the request's fresh id
///   when the payload carries the sentinel id;
/// - present: overwrite its fields in place (identity unchanged).
///
/// Returns the fresh id if this call allocated it.
pub fn merge_loadout_config(
    loadout: &mut Loadout,
    slot: LoadoutSlot,
    slot_id: Oid,
    payload: LoadoutConfigPayload,
    allocation: &mut NewIdAllocation,
) -> Option<Oid> {
    let configs = loadout.slot_mut(slot);

    if payload.remove {
        configs.remove(&slot_id);
        return None;
    }

    if let Some(existing) = configs.get_mut(&slot_id) {
        existing.fields = payload.fields;
        return None;
    }

    if payload.item_id.is_sentinel() {
        let first_use = allocation.allocated().is_none();
        let id = allocation.get_or_allocate();
        configs.insert(LoadoutConfig {
            item_id: id,
            fields: payload.fields,
        });
        return first_use.then_some(id);
    }

    configs.insert(LoadoutConfig {
        item_id: payload.item_id,
        fields: payload.fields,
    });
    None
}
