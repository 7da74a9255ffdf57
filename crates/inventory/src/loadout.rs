//! The per-account loadout aggregate (kept apart from the inventory document).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use hearth_core::{AccountId, AggregateRoot, Entity, LoadoutId, Oid};

use crate::collection::IdentityMap;

/// Loadout categories; each holds any number of saved configs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadoutSlot {
    Normal,
    Sentinel,
    Archwing,
    NormalPvp,
    Lunaro,
    Operator,
    Kdrive,
    Dataknife,
    Mech,
    OperatorAdult,
    Drifter,
}

/// One saved loadout config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutConfig {
    #[serde(rename = "ItemId")]
    pub item_id: Oid,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl Entity for LoadoutConfig {
    type Id = Oid;

    fn id(&self) -> &Oid {
        &self.item_id
    }
}

/// Config entry as sent by the client in a save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutConfigPayload {
    #[serde(rename = "ItemId")]
    pub item_id: Oid,
    #[serde(rename = "Remove", default)]
    pub remove: bool,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

/// Aggregate root: Loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    #[serde(rename = "_id")]
    pub id: LoadoutId,
    #[serde(rename = "loadoutOwnerId")]
    pub owner: AccountId,
    #[serde(flatten)]
    pub slots: IndexMap<LoadoutSlot, IdentityMap<LoadoutConfig>>,
}

impl Loadout {
    pub fn new(owner: AccountId) -> Self {
        Self {
            id: LoadoutId::new(),
            owner,
            slots: IndexMap::new(),
        }
    }

    pub fn slot(&self, slot: LoadoutSlot) -> Option<&IdentityMap<LoadoutConfig>> {
        self.slots.get(&slot)
    }

    pub fn slot_mut(&mut self, slot: LoadoutSlot) -> &mut IdentityMap<LoadoutConfig> {
        self.slots.entry(slot).or_default()
    }
}

impl AggregateRoot for Loadout {
    type Id = LoadoutId;

    const KIND: &'static str = "loadout";

    fn id(&self) -> &LoadoutId {
        &self.id
    }
}

/// At most one fresh loadout id per save request.
///
/// Every sentinel-id entry in the same request resolves to the id allocated by
/// the first one.
#[derive(Debug, Default)]
pub struct NewIdAllocation {
    allocated: Option<Oid>,
}

impl NewIdAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_allocate(&mut self) -> Oid {
        *self.allocated.get_or_insert_with(Oid::new)
    }

    pub fn allocated(&self) -> Option<Oid> {
        self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_use_client_spelling() {
        let json = serde_json::to_value([LoadoutSlot::NormalPvp, LoadoutSlot::OperatorAdult]).unwrap();
        assert_eq!(json, serde_json::json!(["NORMAL_PVP", "OPERATOR_ADULT"]));
    }

    #[test]
    fn allocation_hands_out_one_id() {
        let mut alloc = NewIdAllocation::new();
        assert_eq!(alloc.allocated(), None);
        let first = alloc.get_or_allocate();
        let second = alloc.get_or_allocate();
        assert_eq!(first, second);
        assert_eq!(alloc.allocated(), Some(first));
    }

    #[test]
    fn payload_reads_remove_flag_and_keeps_other_fields() {
        let payload: LoadoutConfigPayload = serde_json::from_value(serde_json::json!({
            "ItemId": { "$oid": "ffffffffffffffffffffffff" },
            "PresetIcon": "",
            "Favorite": false,
            "Remove": true,
        }))
        .unwrap();

        assert!(payload.item_id.is_sentinel());
        assert!(payload.remove);
        assert_eq!(payload.fields.len(), 2);
        assert!(!payload.fields.contains_key("Remove"));
    }
}
