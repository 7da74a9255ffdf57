//! Ordered collections nested inside the inventory document.
//!
//! Two shapes exist:
//!
//! - [`IdentityMap`]: entities addressed by a stable identity (pending recipes,
//!   equipment, loadout configs, affiliations). O(1) find/update/remove by id,
//!   insertion order preserved for serialization.
//! - [`CountedItems`]: stackable items addressed by item type with an additive
//!   count (misc items, blueprints, gear, keys).

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use hearth_core::{DomainError, DomainResult, Entity, ValueObject};

/// An `(ItemType, ItemCount)` pair; a stored stack or a signed delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeCount {
    pub item_type: String,
    pub item_count: i64,
}

impl TypeCount {
    pub fn new(item_type: impl Into<String>, item_count: i64) -> Self {
        Self {
            item_type: item_type.into(),
            item_count,
        }
    }

    /// The same entry with its count negated (consumption <-> refund).
    pub fn negated(&self) -> Self {
        Self {
            item_type: self.item_type.clone(),
            item_count: self.item_count.saturating_neg(),
        }
    }
}

impl ValueObject for TypeCount {}

/// Ordered identity map of entities.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityMap<T: Entity> {
    entries: IndexMap<T::Id, T>,
}

impl<T: Entity> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Entity> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    /// Insert an entity. An entity with the same id is replaced in place
    /// (keeping its position) and returned.
    pub fn insert(&mut self, entity: T) -> Option<T> {
        let id = entity.id().clone();
        self.entries.insert(id, entity)
    }

    /// Remove by id, preserving the order of the remaining entries.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        self.entries.shift_remove(id)
    }

    /// Find an entity by id or append the one built by `make`.
    pub fn get_or_insert_with(&mut self, id: T::Id, make: impl FnOnce() -> T) -> &mut T {
        self.entries.entry(id).or_insert_with(make)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}

impl<T: Entity> FromIterator<T> for IdentityMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::new();
        for entity in iter {
            map.insert(entity);
        }
        map
    }
}

impl<T> Serialize for IdentityMap<T>
where
    T: Entity + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de, T> Deserialize<'de> for IdentityMap<T>
where
    T: Entity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Ordered stacks keyed by item type. Counts are additive; a stack whose count
/// drops to zero or below is pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountedItems {
    stacks: IndexMap<String, i64>,
}

impl CountedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Current count for an item type (0 when absent).
    pub fn count(&self, item_type: &str) -> i64 {
        self.stacks.get(item_type).copied().unwrap_or(0)
    }

    /// Add a signed delta to an item type's stack and return the new count.
    ///
    /// A sum outside `i64` is rejected and leaves the stack untouched.
    pub fn add(&mut self, item_type: &str, delta: i64) -> DomainResult<i64> {
        let count = self
            .count(item_type)
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation(format!("count for {item_type} out of range")))?;
        if count <= 0 {
            self.stacks.shift_remove(item_type);
        } else if let Some(stack) = self.stacks.get_mut(item_type) {
            *stack = count;
        } else {
            self.stacks.insert(item_type.to_string(), count);
        }
        Ok(count)
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeCount> + '_ {
        self.stacks
            .iter()
            .map(|(item_type, count)| TypeCount::new(item_type.clone(), *count))
    }
}

impl Serialize for CountedItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CountedItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<TypeCount>::deserialize(deserializer)?;
        let mut items = CountedItems::new();
        for entry in entries {
            items
                .add(&entry.item_type, entry.item_count)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Slot {
        id: u32,
        label: String,
    }

    impl Entity for Slot {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn slot(id: u32, label: &str) -> Slot {
        Slot {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn identity_map_replaces_in_place_and_keeps_order() {
        let mut map: IdentityMap<Slot> = [slot(1, "a"), slot(2, "b"), slot(3, "c")]
            .into_iter()
            .collect();

        let old = map.insert(slot(2, "B"));
        assert_eq!(old, Some(slot(2, "b")));

        let labels: Vec<_> = map.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "B", "c"]);
    }

    #[test]
    fn identity_map_remove_preserves_remaining_order() {
        let mut map: IdentityMap<Slot> = [slot(1, "a"), slot(2, "b"), slot(3, "c")]
            .into_iter()
            .collect();

        assert!(map.remove(&1).is_some());
        assert!(map.remove(&1).is_none());

        let ids: Vec<_> = map.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn identity_map_serializes_as_plain_sequence() {
        let map: IdentityMap<Slot> = [slot(7, "x")].into_iter().collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!([{ "id": 7, "label": "x" }]));
    }

    #[test]
    fn counted_items_prune_at_zero() {
        let mut items = CountedItems::new();
        assert_eq!(items.add("/Lotus/Types/Items/MiscItems/Ferrite", 5), Ok(5));
        assert_eq!(items.add("/Lotus/Types/Items/MiscItems/Ferrite", -5), Ok(0));
        assert!(items.is_empty());
    }

    #[test]
    fn counted_items_reject_overflowing_sums() {
        let mut items = CountedItems::new();
        items.add("/Lotus/Types/Items/MiscItems/Ferrite", 10).unwrap();

        let err = items.add("/Lotus/Types/Items/MiscItems/Ferrite", i64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(items.count("/Lotus/Types/Items/MiscItems/Ferrite"), 10);

        let json = serde_json::json!([
            { "ItemType": "/A", "ItemCount": i64::MAX },
            { "ItemType": "/A", "ItemCount": 1 },
        ]);
        assert!(serde_json::from_value::<CountedItems>(json).is_err());
    }

    #[test]
    fn negating_the_minimum_count_saturates() {
        let entry = TypeCount::new("/A", i64::MIN);
        assert_eq!(entry.negated().item_count, i64::MAX);
    }

    #[test]
    fn counted_items_serialize_in_insertion_order() {
        let mut items = CountedItems::new();
        items.add("/B", 1).unwrap();
        items.add("/A", 2).unwrap();
        items.add("/B", 3).unwrap();

        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "ItemType": "/B", "ItemCount": 4 },
                { "ItemType": "/A", "ItemCount": 2 },
            ])
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the stored count is the running sum of deltas whenever that
        /// sum stays positive, and the stack is gone once it does not.
        #[test]
        fn stored_count_tracks_positive_running_sum(
            deltas in prop::collection::vec(1i64..1_000i64, 1..20)
        ) {
            let mut items = CountedItems::new();
            let mut expected = 0i64;
            for delta in &deltas {
                expected += delta;
                prop_assert_eq!(items.add("/Lotus/Types/Items/MiscItems/Alloy", *delta), Ok(expected));
            }
            prop_assert_eq!(items.count("/Lotus/Types/Items/MiscItems/Alloy"), expected);

            items.add("/Lotus/Types/Items/MiscItems/Alloy", -expected).unwrap();
            prop_assert_eq!(items.count("/Lotus/Types/Items/MiscItems/Alloy"), 0);
            prop_assert!(items.is_empty());
        }

        /// Property: with deltas anywhere in `i64`, each add either lands on the
        /// exact sum or fails and leaves the stored count as it was.
        #[test]
        fn extreme_deltas_never_wrap(
            deltas in prop::collection::vec(
                prop_oneof![Just(i64::MAX), Just(i64::MIN), any::<i64>(), -1_000i64..1_000i64],
                1..20,
            )
        ) {
            let mut items = CountedItems::new();
            for delta in &deltas {
                let before = items.count("/Lotus/Types/Items/MiscItems/Alloy");
                match before.checked_add(*delta) {
                    Some(sum) => {
                        prop_assert_eq!(items.add("/Lotus/Types/Items/MiscItems/Alloy", *delta), Ok(sum));
                        prop_assert_eq!(items.count("/Lotus/Types/Items/MiscItems/Alloy"), sum.max(0));
                    }
                    None => {
                        prop_assert!(items.add("/Lotus/Types/Items/MiscItems/Alloy", *delta).is_err());
                        prop_assert_eq!(items.count("/Lotus/Types/Items/MiscItems/Alloy"), before);
                    }
                }
            }
        }
    }
}
