//! Owned equipment, grouped by a closed set of categories.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use hearth_core::{DomainError, DomainResult, Entity, Oid};

use crate::collection::IdentityMap;

/// One indexed configuration slot of an equipment entry (colors, upgrades,
/// skins). The payload is client-defined and stored as-is.
pub type ItemConfig = Map<String, JsonValue>;

/// Number of configuration slots an equipment entry may hold.
pub const MAX_ITEM_CONFIGS: usize = 16;

/// Equipment categories the inventory knows about.
///
/// Serialized with the client's collection key (e.g. `"LongGuns"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentCategory {
    Suits,
    LongGuns,
    Pistols,
    Melee,
    SpaceSuits,
    SpaceGuns,
    SpaceMelee,
    Sentinels,
    SentinelWeapons,
    OperatorAmps,
    Hoverboards,
    MechSuits,
    DataKnives,
    KubrowPets,
    MoaPets,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 15] = [
        Self::Suits,
        Self::LongGuns,
        Self::Pistols,
        Self::Melee,
        Self::SpaceSuits,
        Self::SpaceGuns,
        Self::SpaceMelee,
        Self::Sentinels,
        Self::SentinelWeapons,
        Self::OperatorAmps,
        Self::Hoverboards,
        Self::MechSuits,
        Self::DataKnives,
        Self::KubrowPets,
        Self::MoaPets,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Suits => "Suits",
            Self::LongGuns => "LongGuns",
            Self::Pistols => "Pistols",
            Self::Melee => "Melee",
            Self::SpaceSuits => "SpaceSuits",
            Self::SpaceGuns => "SpaceGuns",
            Self::SpaceMelee => "SpaceMelee",
            Self::Sentinels => "Sentinels",
            Self::SentinelWeapons => "SentinelWeapons",
            Self::OperatorAmps => "OperatorAmps",
            Self::Hoverboards => "Hoverboards",
            Self::MechSuits => "MechSuits",
            Self::DataKnives => "DataKnives",
            Self::KubrowPets => "KubrowPets",
            Self::MoaPets => "MoaPets",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl core::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single owned piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentItem {
    pub item_id: Oid,
    pub item_type: String,
    #[serde(default)]
    pub configs: Vec<ItemConfig>,
    #[serde(default, rename = "XP")]
    pub xp: i64,
}

impl EquipmentItem {
    /// A freshly acquired item with a new identity and no configuration.
    pub fn acquire(item_type: impl Into<String>) -> Self {
        Self {
            item_id: Oid::new(),
            item_type: item_type.into(),
            configs: Vec::new(),
            xp: 0,
        }
    }

    /// Store `config` at slot `index`, padding skipped slots with empty configs.
    pub fn set_config(&mut self, index: usize, config: ItemConfig) -> DomainResult<()> {
        if index >= MAX_ITEM_CONFIGS {
            return Err(DomainError::validation(format!(
                "config index {index} exceeds {} slots",
                MAX_ITEM_CONFIGS
            )));
        }
        if self.configs.len() <= index {
            self.configs.resize_with(index + 1, ItemConfig::new);
        }
        self.configs[index] = config;
        Ok(())
    }
}

impl Entity for EquipmentItem {
    type Id = Oid;

    fn id(&self) -> &Oid {
        &self.item_id
    }
}

/// All equipment collections of an inventory, keyed by category.
///
/// Flattened into the inventory document, so each category appears as its own
/// top-level key. Categories that were never touched are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentInventory {
    by_category: IndexMap<EquipmentCategory, IdentityMap<EquipmentItem>>,
}

impl EquipmentInventory {
    pub fn get(&self, category: EquipmentCategory) -> Option<&IdentityMap<EquipmentItem>> {
        self.by_category.get(&category)
    }

    pub fn get_mut(&mut self, category: EquipmentCategory) -> &mut IdentityMap<EquipmentItem> {
        self.by_category.entry(category).or_default()
    }

    pub fn find(&self, category: EquipmentCategory, id: &Oid) -> Option<&EquipmentItem> {
        self.get(category).and_then(|items| items.get(id))
    }

    pub fn find_mut(&mut self, category: EquipmentCategory, id: &Oid) -> Option<&mut EquipmentItem> {
        self.by_category
            .get_mut(&category)
            .and_then(|items| items.get_mut(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip_through_from_key() {
        for category in EquipmentCategory::ALL {
            assert_eq!(EquipmentCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(EquipmentCategory::from_key("ValidNewLoadoutId"), None);
    }

    #[test]
    fn set_config_pads_missing_slots() {
        let mut item = EquipmentItem::acquire("/Lotus/Powersuits/Mag/Mag");
        let mut config = ItemConfig::new();
        config.insert("Skins".into(), serde_json::json!(["", "", ""]));

        item.set_config(2, config.clone()).unwrap();

        assert_eq!(item.configs.len(), 3);
        assert!(item.configs[0].is_empty());
        assert!(item.configs[1].is_empty());
        assert_eq!(item.configs[2], config);
    }

    #[test]
    fn set_config_rejects_indices_past_the_last_slot() {
        let mut item = EquipmentItem::acquire("/Lotus/Powersuits/Mag/Mag");

        for index in [MAX_ITEM_CONFIGS, usize::MAX] {
            let err = item.set_config(index, ItemConfig::new()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert!(item.configs.is_empty());

        item.set_config(MAX_ITEM_CONFIGS - 1, ItemConfig::new()).unwrap();
        assert_eq!(item.configs.len(), MAX_ITEM_CONFIGS);
    }
}
