//! Static game-data lookups (items, recipes, syndicates).
//!
//! The catalogs are read-only collaborators of the mutation engine. The
//! [`StaticCatalog`] implementation is loaded from a JSON document; the
//! built-in one ships a small sample of real item paths for dev use.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::changes::{CountedKind, CurrencyKind};
use crate::collection::TypeCount;
use crate::equipment::EquipmentCategory;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where an item lands when granted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemCategory {
    Currency(CurrencyKind),
    Counted(CountedKind),
    Equipment(EquipmentCategory),
}

impl ItemCategory {
    pub fn key(self) -> &'static str {
        match self {
            Self::Currency(kind) => kind.key(),
            Self::Counted(kind) => kind.key(),
            Self::Equipment(category) => category.key(),
        }
    }
}

impl TryFrom<String> for ItemCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let currency = [
            CurrencyKind::RegularCredits,
            CurrencyKind::PremiumCredits,
            CurrencyKind::FusionPoints,
            CurrencyKind::PrimeTokens,
        ]
        .into_iter()
        .find(|k| k.key() == value)
        .map(Self::Currency);
        let counted = || {
            [
                CountedKind::MiscItems,
                CountedKind::Recipes,
                CountedKind::Consumables,
                CountedKind::LevelKeys,
            ]
            .into_iter()
            .find(|k| k.key() == value)
            .map(Self::Counted)
        };

        currency
            .or_else(counted)
            .or_else(|| EquipmentCategory::from_key(&value).map(Self::Equipment))
            .ok_or_else(|| format!("unknown item category '{value}'"))
    }
}

impl From<ItemCategory> for String {
    fn from(value: ItemCategory) -> Self {
        value.key().to_string()
    }
}

/// Catalog entry for a grantable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub category: ItemCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// How a blueprint is built and what it yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDefinition {
    pub result_type: String,
    #[serde(default = "default_num")]
    pub num: i64,
    #[serde(default)]
    pub build_price: i64,
    /// Build duration in seconds.
    #[serde(default)]
    pub build_time: i64,
    #[serde(default)]
    pub skip_build_time_price: i64,
    #[serde(default)]
    pub consume_on_use: bool,
    #[serde(default)]
    pub ingredients: Vec<TypeCount>,
}

fn default_num() -> i64 {
    1
}

/// Cost of advancing a syndicate rank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sacrifice {
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub items: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndicateTitle {
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sacrifice: Option<Sacrifice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyndicateDefinition {
    #[serde(default)]
    pub initiation_sacrifice: Option<Sacrifice>,
    #[serde(default)]
    pub initiation_reward: Option<String>,
    #[serde(default)]
    pub titles: Vec<SyndicateTitle>,
    #[serde(default)]
    pub favours: Vec<String>,
}

impl SyndicateDefinition {
    /// Sacrifice bound to a title level; `None` means that tier costs nothing.
    pub fn title_sacrifice(&self, level: i32) -> Option<&Sacrifice> {
        self.titles
            .iter()
            .find(|t| t.level == level)
            .and_then(|t| t.sacrifice.as_ref())
    }
}

/// Item + recipe lookup.
pub trait ItemCatalog: Send + Sync {
    fn item(&self, item_type: &str) -> Option<&CatalogItem>;
    fn recipe(&self, recipe_type: &str) -> Option<&RecipeDefinition>;

    /// Every grantable item, in no particular order.
    fn items(&self) -> Box<dyn Iterator<Item = (&str, &CatalogItem)> + '_>;
}

/// Syndicate lookup.
pub trait SyndicateCatalog: Send + Sync {
    fn syndicate(&self, tag: &str) -> Option<&SyndicateDefinition>;
}

impl<C> ItemCatalog for Arc<C>
where
    C: ItemCatalog + ?Sized,
{
    fn item(&self, item_type: &str) -> Option<&CatalogItem> {
        (**self).item(item_type)
    }

    fn recipe(&self, recipe_type: &str) -> Option<&RecipeDefinition> {
        (**self).recipe(recipe_type)
    }

    fn items(&self) -> Box<dyn Iterator<Item = (&str, &CatalogItem)> + '_> {
        (**self).items()
    }
}

impl<C> SyndicateCatalog for Arc<C>
where
    C: SyndicateCatalog + ?Sized,
{
    fn syndicate(&self, tag: &str) -> Option<&SyndicateDefinition> {
        (**self).syndicate(tag)
    }
}

/// In-memory catalog backed by hash maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    items: HashMap<String, CatalogItem>,
    #[serde(default)]
    recipes: HashMap<String, RecipeDefinition>,
    #[serde(default)]
    syndicates: HashMap<String, SyndicateDefinition>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The sample catalog compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn with_item(mut self, item_type: impl Into<String>, category: ItemCategory) -> Self {
        self.items
            .insert(item_type.into(), CatalogItem { category, name: None });
        self
    }

    pub fn with_named_item(
        mut self,
        item_type: impl Into<String>,
        category: ItemCategory,
        name: impl Into<String>,
    ) -> Self {
        self.items.insert(
            item_type.into(),
            CatalogItem {
                category,
                name: Some(name.into()),
            },
        );
        self
    }

    pub fn with_recipe(mut self, recipe_type: impl Into<String>, recipe: RecipeDefinition) -> Self {
        self.recipes.insert(recipe_type.into(), recipe);
        self
    }

    pub fn with_syndicate(mut self, tag: impl Into<String>, syndicate: SyndicateDefinition) -> Self {
        self.syndicates.insert(tag.into(), syndicate);
        self
    }
}

impl ItemCatalog for StaticCatalog {
    fn item(&self, item_type: &str) -> Option<&CatalogItem> {
        self.items.get(item_type)
    }

    fn recipe(&self, recipe_type: &str) -> Option<&RecipeDefinition> {
        self.recipes.get(recipe_type)
    }

    fn items(&self) -> Box<dyn Iterator<Item = (&str, &CatalogItem)> + '_> {
        Box::new(self.items.iter().map(|(item_type, item)| (item_type.as_str(), item)))
    }
}

impl SyndicateCatalog for StaticCatalog {
    fn syndicate(&self, tag: &str) -> Option<&SyndicateDefinition> {
        self.syndicates.get(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = StaticCatalog::builtin().unwrap();
        let mag = catalog.item("/Lotus/Powersuits/Mag/Mag").unwrap();
        assert_eq!(mag.category, ItemCategory::Equipment(EquipmentCategory::Suits));

        let recipe = catalog
            .recipe("/Lotus/Types/Recipes/WarframeRecipes/MagBlueprint")
            .unwrap();
        assert_eq!(recipe.result_type, "/Lotus/Powersuits/Mag/Mag");
        assert!(recipe.consume_on_use);

        assert!(catalog.syndicate("NewLokaSyndicate").is_some());
    }

    #[test]
    fn category_strings_map_to_closed_variants() {
        let parse = |s: &str| ItemCategory::try_from(s.to_string());
        assert_eq!(parse("MiscItems"), Ok(ItemCategory::Counted(CountedKind::MiscItems)));
        assert_eq!(parse("RegularCredits"), Ok(ItemCategory::Currency(CurrencyKind::RegularCredits)));
        assert_eq!(parse("LongGuns"), Ok(ItemCategory::Equipment(EquipmentCategory::LongGuns)));
        assert!(parse("Ships").is_err());
    }

    #[test]
    fn title_sacrifice_is_optional_per_level() {
        let syndicate = SyndicateDefinition {
            titles: vec![
                SyndicateTitle { level: 1, sacrifice: None },
                SyndicateTitle {
                    level: 2,
                    sacrifice: Some(Sacrifice { credits: 10_000, items: vec![] }),
                },
            ],
            ..SyndicateDefinition::default()
        };

        assert!(syndicate.title_sacrifice(1).is_none());
        assert_eq!(syndicate.title_sacrifice(2).map(|s| s.credits), Some(10_000));
        assert!(syndicate.title_sacrifice(5).is_none());
    }
}
