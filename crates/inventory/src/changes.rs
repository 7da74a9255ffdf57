//! Change-sets: the per-request summary of deltas returned to the client.
//!
//! A change-set never carries absolute values. Currency kinds hold the signed
//! amount applied, list kinds hold the entries added or consumed. Fragments from
//! several primitives are merged with [`InventoryChanges::combine`]:
//!
//! - currency kinds add arithmetically;
//! - list kinds concatenate in call order (no dedup across fragments).

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use hearth_core::ValueObject;

use crate::collection::TypeCount;
use crate::equipment::{EquipmentCategory, EquipmentItem};

/// Scalar currencies tracked on the inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CurrencyKind {
    RegularCredits,
    PremiumCredits,
    PremiumCreditsFree,
    FusionPoints,
    PrimeTokens,
}

impl CurrencyKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::RegularCredits => "RegularCredits",
            Self::PremiumCredits => "PremiumCredits",
            Self::PremiumCreditsFree => "PremiumCreditsFree",
            Self::FusionPoints => "FusionPoints",
            Self::PrimeTokens => "PrimeTokens",
        }
    }
}

/// Stackable collections addressed by item type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CountedKind {
    MiscItems,
    Recipes,
    Consumables,
    LevelKeys,
}

impl CountedKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::MiscItems => "MiscItems",
            Self::Recipes => "Recipes",
            Self::Consumables => "Consumables",
            Self::LevelKeys => "LevelKeys",
        }
    }
}

/// Change-set value object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryChanges {
    currencies: IndexMap<CurrencyKind, i64>,
    counted: IndexMap<CountedKind, Vec<TypeCount>>,
    equipment: IndexMap<EquipmentCategory, Vec<EquipmentItem>>,
}

impl ValueObject for InventoryChanges {}

impl InventoryChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty() && self.counted.is_empty() && self.equipment.is_empty()
    }

    /// Record a currency delta (summed with any existing delta of that kind,
    /// saturating at the `i64` bounds).
    pub fn add_currency(&mut self, kind: CurrencyKind, delta: i64) {
        let entry = self.currencies.entry(kind).or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    /// Append item deltas to a counted kind.
    pub fn extend_counted(&mut self, kind: CountedKind, entries: impl IntoIterator<Item = TypeCount>) {
        self.counted.entry(kind).or_default().extend(entries);
    }

    /// Append newly acquired equipment to a category.
    pub fn extend_equipment(
        &mut self,
        category: EquipmentCategory,
        items: impl IntoIterator<Item = EquipmentItem>,
    ) {
        self.equipment.entry(category).or_default().extend(items);
    }

    pub fn currency(&self, kind: CurrencyKind) -> Option<i64> {
        self.currencies.get(&kind).copied()
    }

    pub fn counted(&self, kind: CountedKind) -> &[TypeCount] {
        self.counted.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn equipment(&self, category: EquipmentCategory) -> &[EquipmentItem] {
        self.equipment.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge `other` into `self`.
    pub fn merge(&mut self, other: InventoryChanges) {
        for (kind, delta) in other.currencies {
            self.add_currency(kind, delta);
        }
        for (kind, entries) in other.counted {
            self.extend_counted(kind, entries);
        }
        for (category, items) in other.equipment {
            self.extend_equipment(category, items);
        }
    }

    /// `combine(a, b)`: currencies summed, lists concatenated a-then-b.
    pub fn combine(mut self, other: InventoryChanges) -> InventoryChanges {
        self.merge(other);
        self
    }

    /// Left fold of fragments in call order.
    pub fn fold(fragments: impl IntoIterator<Item = InventoryChanges>) -> InventoryChanges {
        fragments
            .into_iter()
            .fold(InventoryChanges::new(), InventoryChanges::combine)
    }
}

impl Serialize for InventoryChanges {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.currencies.len() + self.counted.len() + self.equipment.len();
        let mut map = serializer.serialize_map(Some(len))?;
        for (kind, delta) in &self.currencies {
            map.serialize_entry(kind.key(), delta)?;
        }
        for (kind, entries) in &self.counted {
            map.serialize_entry(kind.key(), entries)?;
        }
        for (category, items) in &self.equipment {
            map.serialize_entry(category.key(), items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn credits(delta: i64) -> InventoryChanges {
        let mut c = InventoryChanges::new();
        c.add_currency(CurrencyKind::RegularCredits, delta);
        c
    }

    fn misc(item_type: &str, count: i64) -> InventoryChanges {
        let mut c = InventoryChanges::new();
        c.extend_counted(CountedKind::MiscItems, [TypeCount::new(item_type, count)]);
        c
    }

    #[test]
    fn list_kinds_concatenate_without_dedup() {
        let merged = misc("/Lotus/Types/Items/MiscItems/Ferrite", 2)
            .combine(misc("/Lotus/Types/Items/MiscItems/Ferrite", 3));

        assert_eq!(
            merged.counted(CountedKind::MiscItems),
            &[
                TypeCount::new("/Lotus/Types/Items/MiscItems/Ferrite", 2),
                TypeCount::new("/Lotus/Types/Items/MiscItems/Ferrite", 3),
            ]
        );
    }

    #[test]
    fn serializes_currencies_before_lists() {
        let merged = misc("/Lotus/Types/Items/MiscItems/Ferrite", -4).combine(credits(-1_000));
        let json = serde_json::to_string(&merged).unwrap();
        assert_eq!(
            json,
            r#"{"RegularCredits":-1000,"MiscItems":[{"ItemType":"/Lotus/Types/Items/MiscItems/Ferrite","ItemCount":-4}]}"#
        );
    }

    #[test]
    fn fold_matches_pairwise_combine() {
        let fragments = vec![credits(5), misc("/A", 1), credits(-2), misc("/B", 4)];
        let folded = InventoryChanges::fold(fragments.clone());
        let pairwise = fragments[0]
            .clone()
            .combine(fragments[1].clone())
            .combine(fragments[2].clone())
            .combine(fragments[3].clone());
        assert_eq!(folded, pairwise);
        assert_eq!(folded.currency(CurrencyKind::RegularCredits), Some(3));
    }

    #[test]
    fn empty_change_set_serializes_as_empty_object() {
        let json = serde_json::to_value(InventoryChanges::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: combine is associative for currency kinds.
        #[test]
        fn combine_is_associative_for_currencies(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64,
            premium in any::<bool>(),
        ) {
            let kind = if premium { CurrencyKind::PremiumCredits } else { CurrencyKind::RegularCredits };
            let frag = |v: i64| {
                let mut ch = InventoryChanges::new();
                ch.add_currency(kind, v);
                ch
            };

            let left = frag(a).combine(frag(b)).combine(frag(c));
            let right = frag(a).combine(frag(b).combine(frag(c)));
            prop_assert_eq!(left.currency(kind), right.currency(kind));
            prop_assert_eq!(left.currency(kind), Some(a + b + c));
        }
    }
}
