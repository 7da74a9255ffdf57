//! Save-loadout: apply a batch of loadout/equipment config changes.
//!
//! The request is a JSON object whose keys name sections. Each section is
//! parsed into a [`LoadoutSection`] before anything is applied, so a malformed
//! section rejects the whole request untouched.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use hearth_core::{DomainError, DomainResult, Oid};

use crate::equipment::{EquipmentCategory, ItemConfig};
use crate::inventory::{Inventory, OperatorConfig};
use crate::loadout::{Loadout, LoadoutConfigPayload, LoadoutSlot, NewIdAllocation};
use crate::primitives::merge_loadout_config;

/// Raw request body, keys in client order.
pub type SaveLoadoutRequest = IndexMap<String, JsonValue>;

/// Operator-style loadout lists stored on the inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperatorLoadoutKind {
    Operator,
    AdultOperator,
    Kahl,
}

/// One parsed section of a save-loadout request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadoutSection {
    OperatorLoadouts(OperatorLoadoutKind, IndexMap<String, OperatorConfig>),
    LoadOuts(IndexMap<LoadoutSlot, IndexMap<String, LoadoutConfigPayload>>),
    CurrentLoadOutIds(Vec<Oid>),
    EquippedGear(Vec<String>),
    EquippedEmotes(Vec<String>),
    UseAdultOperatorLoadout(bool),
    /// Item id → config index → config.
    ItemConfigs(EquipmentCategory, IndexMap<String, IndexMap<String, ItemConfig>>),
    ValidNewLoadoutId,
    Unknown(String),
}

fn section_value<T: DeserializeOwned>(key: &str, value: JsonValue) -> DomainResult<T> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::validation(format!("malformed loadout section {key}: {e}")))
}

impl LoadoutSection {
    pub fn parse(key: &str, value: JsonValue) -> DomainResult<Self> {
        let section = match key {
            "OperatorLoadOuts" => Self::OperatorLoadouts(OperatorLoadoutKind::Operator, section_value(key, value)?),
            "AdultOperatorLoadOuts" => {
                Self::OperatorLoadouts(OperatorLoadoutKind::AdultOperator, section_value(key, value)?)
            }
            "KahlLoadOuts" => Self::OperatorLoadouts(OperatorLoadoutKind::Kahl, section_value(key, value)?),
            "LoadOuts" => Self::LoadOuts(section_value(key, value)?),
            "CurrentLoadOutIds" => Self::CurrentLoadOutIds(section_value(key, value)?),
            "EquippedGear" => Self::EquippedGear(section_value(key, value)?),
            "EquippedEmotes" => Self::EquippedEmotes(section_value(key, value)?),
            "UseAdultOperatorLoadout" => Self::UseAdultOperatorLoadout(section_value(key, value)?),
            "ValidNewLoadoutId" => Self::ValidNewLoadoutId,
            other => match EquipmentCategory::from_key(other) {
                Some(category) => Self::ItemConfigs(category, section_value(key, value)?),
                None => Self::Unknown(other.to_string()),
            },
        };
        Ok(section)
    }
}

/// Parse every non-empty section of a request, in request order.
pub fn parse_sections(request: SaveLoadoutRequest) -> DomainResult<Vec<LoadoutSection>> {
    request
        .into_iter()
        .filter(|(_, value)| !is_empty_object(value))
        .map(|(key, value)| LoadoutSection::parse(&key, value))
        .collect()
}

fn is_empty_object(value: &JsonValue) -> bool {
    value.as_object().is_some_and(|o| o.is_empty())
}

/// Result of a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveLoadoutOutcome {
    /// Fresh id minted for sentinel configs, if any.
    pub new_loadout_id: Option<Oid>,
    /// Whether the loadout aggregate was modified and must be saved.
    pub loadout_changed: bool,
}

fn parse_id(raw: &str) -> DomainResult<Oid> {
    raw.parse()
}

/// Apply parsed sections to the inventory and (for `LoadOuts`) the loadout.
///
/// `loadout` is only required when a `LoadOuts` section is present.
pub fn save_loadout(
    inventory: &mut Inventory,
    mut loadout: Option<&mut Loadout>,
    sections: Vec<LoadoutSection>,
) -> DomainResult<SaveLoadoutOutcome> {
    let mut outcome = SaveLoadoutOutcome::default();
    let mut allocation = NewIdAllocation::new();

    for section in sections {
        match section {
            LoadoutSection::OperatorLoadouts(kind, configs) => {
                let target = match kind {
                    OperatorLoadoutKind::Operator => &mut inventory.operator_loadouts,
                    OperatorLoadoutKind::AdultOperator => &mut inventory.adult_operator_loadouts,
                    OperatorLoadoutKind::Kahl => &mut inventory.kahl_loadouts,
                };
                for (raw_id, config) in configs {
                    let id = parse_id(&raw_id)?;
                    match target.get_mut(&id) {
                        Some(existing) => existing.fields.extend(config.fields),
                        None => {
                            target.insert(config);
                        }
                    }
                }
            }
            LoadoutSection::LoadOuts(slots) => {
                let loadout = loadout
                    .as_deref_mut()
                    .ok_or_else(|| DomainError::not_found("loadout"))?;
                for (slot, configs) in slots {
                    for (raw_id, payload) in configs {
                        let slot_id = parse_id(&raw_id)?;
                        if let Some(id) = merge_loadout_config(loadout, slot, slot_id, payload, &mut allocation) {
                            outcome.new_loadout_id = Some(id);
                        }
                    }
                }
                outcome.loadout_changed = true;
            }
            LoadoutSection::CurrentLoadOutIds(ids) => inventory.current_loadout_ids = ids,
            LoadoutSection::EquippedGear(gear) => inventory.equipped_gear = gear,
            LoadoutSection::EquippedEmotes(emotes) => inventory.equipped_emotes = emotes,
            LoadoutSection::UseAdultOperatorLoadout(flag) => inventory.use_adult_operator_loadout = flag,
            LoadoutSection::ItemConfigs(category, items) => {
                tracing::debug!(%category, items = items.len(), "item configs saved");
                for (raw_id, configs) in items {
                    let id = parse_id(&raw_id)?;
                    let item = inventory
                        .equipment
                        .find_mut(category, &id)
                        .ok_or_else(|| DomainError::not_found(format!("{category} item {id}")))?;
                    for (raw_index, config) in configs {
                        let index: usize = raw_index.parse().map_err(|_| {
                            DomainError::validation(format!("config index {raw_index} is not a number"))
                        })?;
                        item.set_config(index, config)?;
                    }
                }
            }
            LoadoutSection::ValidNewLoadoutId => {}
            LoadoutSection::Unknown(key) => {
                tracing::warn!(category = %key, "loadout category not implemented, changes ignored");
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentItem;
    use hearth_core::AccountId;
    use serde_json::json;

    fn request(value: JsonValue) -> SaveLoadoutRequest {
        serde_json::from_value(value).unwrap()
    }

    fn apply(
        inventory: &mut Inventory,
        loadout: Option<&mut Loadout>,
        value: JsonValue,
    ) -> DomainResult<SaveLoadoutOutcome> {
        save_loadout(inventory, loadout, parse_sections(request(value))?)
    }

    #[test]
    fn empty_sections_and_unknown_keys_are_skipped() {
        let sections = parse_sections(request(json!({
            "LoadOuts": {},
            "ValidNewLoadoutId": "ffffffffffffffffffffffff",
            "Ships": { "a": 1 },
        })))
        .unwrap();

        assert_eq!(
            sections,
            vec![
                LoadoutSection::ValidNewLoadoutId,
                LoadoutSection::Unknown("Ships".into())
            ]
        );
    }

    #[test]
    fn sentinel_configs_share_one_new_id_across_slots() {
        let mut inventory = Inventory::new(AccountId::new());
        let mut loadout = Loadout::new(inventory.account_owner_id);

        let outcome = apply(
            &mut inventory,
            Some(&mut loadout),
            json!({
                "LoadOuts": {
                    "NORMAL": {
                        "ffffffffffffffffffffffff": {
                            "ItemId": { "$oid": "ffffffffffffffffffffffff" },
                            "PresetIcon": "a"
                        }
                    },
                    "ARCHWING": {
                        "ffffffffffffffffffffffff": {
                            "ItemId": { "$oid": "ffffffffffffffffffffffff" },
                            "PresetIcon": "b"
                        }
                    },
                    "SENTINEL": {}
                }
            }),
        )
        .unwrap();

        let id = outcome.new_loadout_id.unwrap();
        assert!(outcome.loadout_changed);
        assert!(loadout.slot(LoadoutSlot::Normal).unwrap().contains(&id));
        assert!(loadout.slot(LoadoutSlot::Archwing).unwrap().contains(&id));
        assert!(loadout.slot(LoadoutSlot::Sentinel).is_none());
    }

    #[test]
    fn loadouts_section_requires_a_loadout() {
        let mut inventory = Inventory::new(AccountId::new());
        let err = apply(
            &mut inventory,
            None,
            json!({ "LoadOuts": { "NORMAL": { "5f1d2c3b4a5968778695a4b3": { "ItemId": "5f1d2c3b4a5968778695a4b3" } } } }),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn operator_loadout_inserts_then_merges_fields() {
        let mut inventory = Inventory::new(AccountId::new());
        let id = "5f1d2c3b4a5968778695a4b3";

        apply(
            &mut inventory,
            None,
            json!({ "OperatorLoadOuts": { id: { "ItemId": { "$oid": id }, "Skins": ["a"], "Upgrades": [] } } }),
        )
        .unwrap();
        apply(
            &mut inventory,
            None,
            json!({ "OperatorLoadOuts": { id: { "ItemId": { "$oid": id }, "Skins": ["b"] } } }),
        )
        .unwrap();

        let oid: Oid = id.parse().unwrap();
        let config = inventory.operator_loadouts.get(&oid).unwrap();
        assert_eq!(inventory.operator_loadouts.len(), 1);
        assert_eq!(config.fields["Skins"], json!(["b"]));
        assert_eq!(config.fields["Upgrades"], json!([]));
    }

    #[test]
    fn item_configs_are_written_by_index() {
        let mut inventory = Inventory::new(AccountId::new());
        let item = EquipmentItem::acquire("/Lotus/Powersuits/Mag/Mag");
        let id = item.item_id;
        inventory.equipment.get_mut(EquipmentCategory::Suits).insert(item);

        apply(
            &mut inventory,
            None,
            json!({
                "Suits": { id.to_hex(): { "2": { "Skins": ["x"] } } },
                "EquippedGear": ["/Lotus/Types/Items/Gear/Scanner"],
                "UseAdultOperatorLoadout": true
            }),
        )
        .unwrap();

        let saved = inventory.equipment.find(EquipmentCategory::Suits, &id).unwrap();
        assert_eq!(saved.configs.len(), 3);
        assert_eq!(saved.configs[2]["Skins"], json!(["x"]));
        assert_eq!(inventory.equipped_gear, vec!["/Lotus/Types/Items/Gear/Scanner".to_string()]);
        assert!(inventory.use_adult_operator_loadout);
    }

    #[test]
    fn out_of_range_config_index_is_a_validation_error() {
        let mut inventory = Inventory::new(AccountId::new());
        let item = EquipmentItem::acquire("/Lotus/Powersuits/Mag/Mag");
        let id = item.item_id;
        inventory.equipment.get_mut(EquipmentCategory::Suits).insert(item);

        for raw_index in ["18446744073709551615", "4000000000", "16"] {
            let err = apply(
                &mut inventory,
                None,
                json!({ "Suits": { id.to_hex(): { raw_index: { "Skins": ["x"] } } } }),
            )
            .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "index {raw_index}");
        }

        let saved = inventory.equipment.find(EquipmentCategory::Suits, &id).unwrap();
        assert!(saved.configs.is_empty());
    }

    #[test]
    fn config_for_missing_item_is_not_found() {
        let mut inventory = Inventory::new(AccountId::new());
        let err = apply(
            &mut inventory,
            None,
            json!({ "LongGuns": { "5f1d2c3b4a5968778695a4b3": { "0": {} } } }),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
