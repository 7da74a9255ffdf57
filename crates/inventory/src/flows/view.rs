//! Read-side projections of the inventory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use hearth_core::{DomainError, DomainResult, Oid};

use crate::catalog::{ItemCatalog, ItemCategory};
use crate::equipment::EquipmentCategory;
use crate::inventory::Inventory;
use crate::loadout::Loadout;

/// Far-future timestamp; the client never waits for a refill.
const NEXT_REFILL_MILLIS: &str = "9999999999999";

/// Client view of the inventory: the stored document with the loadout
/// aggregate embedded under `LoadOutPresets` and a fresh sync marker.
pub fn inventory_view(inventory: &Inventory, loadout: Option<&Loadout>) -> DomainResult<JsonValue> {
    let mut document = serde_json::to_value(inventory).map_err(render_failed)?;
    let JsonValue::Object(fields) = &mut document else {
        return Err(DomainError::invalid_state("inventory did not render as an object"));
    };

    if let Some(loadout) = loadout {
        fields.insert(
            "LoadOutPresets".to_string(),
            serde_json::to_value(loadout).map_err(render_failed)?,
        );
    }
    fields.insert(
        "LastInventorySync".to_string(),
        serde_json::to_value(Oid::new()).map_err(render_failed)?,
    );
    fields.insert(
        "NextRefill".to_string(),
        json!({ "$date": { "$numberLong": NEXT_REFILL_MILLIS } }),
    );
    fields.insert("HasOwnedVoidProjectionsPreviously".to_string(), JsonValue::Bool(true));
    Ok(document)
}

fn render_failed(err: serde_json::Error) -> DomainError {
    DomainError::invalid_state(format!("inventory view rendering failed: {err}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStat {
    #[serde(rename = "type")]
    pub item_type: String,
    pub xp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatsView {
    pub weapons: Vec<WeaponStat>,
}

/// Per-item affinity stats.
pub fn stats_view(inventory: &Inventory) -> StatsView {
    StatsView {
        weapons: inventory
            .xp_info
            .iter()
            .map(|info| WeaponStat {
                item_type: info.item_type.clone(),
                xp: info.xp,
            })
            .collect(),
    }
}

/// One entry of the item picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedItem {
    pub unique_name: String,
    pub name: String,
}

/// Catalog items grouped for the item picker, keyed by list name.
pub type ItemLists = IndexMap<String, Vec<ListedItem>>;

/// List key for everything that is not equipment.
pub const MISC_ITEM_LIST: &str = "miscitems";

/// Group the catalog for the item picker.
///
/// Equipment lands in a list named after its category; the weapon lists are
/// always present, even when empty. Everything else goes to
/// [`MISC_ITEM_LIST`] with its unique name prefixed by the category key.
/// Items without a display name are listed under their unique name. Each list
/// is sorted by unique name.
pub fn item_lists(catalog: &dyn ItemCatalog) -> ItemLists {
    let mut lists = ItemLists::new();
    for category in [EquipmentCategory::LongGuns, EquipmentCategory::Pistols, EquipmentCategory::Melee] {
        lists.insert(category.key().to_string(), Vec::new());
    }
    lists.insert(MISC_ITEM_LIST.to_string(), Vec::new());

    for (item_type, item) in catalog.items() {
        let name = item.name.clone().unwrap_or_else(|| item_type.to_string());
        let (list, unique_name) = match item.category {
            ItemCategory::Equipment(category) => (category.key(), item_type.to_string()),
            other => (MISC_ITEM_LIST, format!("{}:{item_type}", other.key())),
        };
        lists
            .entry(list.to_string())
            .or_default()
            .push(ListedItem { unique_name, name });
    }

    for entries in lists.values_mut() {
        entries.sort_by(|a, b| a.unique_name.cmp(&b.unique_name));
    }
    lists
}
