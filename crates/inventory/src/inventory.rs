//! The per-account inventory aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use hearth_core::{AccountId, AggregateRoot, Entity, GuildId, LoadoutId, Oid};

use crate::changes::{CountedKind, CurrencyKind};
use crate::collection::{CountedItems, IdentityMap};
use crate::equipment::EquipmentInventory;

/// A craft in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PendingRecipe {
    pub item_id: Oid,
    /// Blueprint item type being built.
    pub item_type: String,
    pub completion_date: DateTime<Utc>,
}

impl Entity for PendingRecipe {
    type Id = Oid;

    fn id(&self) -> &Oid {
        &self.item_id
    }
}

/// Standing with one syndicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Affiliation {
    pub tag: String,
    pub standing: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<i32>,
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub initiated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_favors_earned: Vec<i32>,
}

impl Affiliation {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            standing: 0,
            title: None,
            initiated: false,
            free_favors_earned: Vec::new(),
        }
    }
}

impl Entity for Affiliation {
    type Id = String;

    fn id(&self) -> &String {
        &self.tag
    }
}

/// Operator-style loadout entry (operator, adult operator, drifter).
///
/// Only the identity is interpreted; the remaining fields are client-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    #[serde(rename = "ItemId")]
    pub item_id: Oid,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl Entity for OperatorConfig {
    type Id = Oid;

    fn id(&self) -> &Oid {
        &self.item_id
    }
}

/// Accumulated affinity for one item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XpInfo {
    pub item_type: String,
    #[serde(rename = "XP")]
    pub xp: i64,
}

/// Daily standing/focus allowances that refill on the first login of a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DailyAllowances {
    pub daily_affiliation: i64,
    pub daily_affiliation_pvp: i64,
    pub daily_affiliation_library: i64,
    pub daily_affiliation_cetus: i64,
    pub daily_affiliation_quills: i64,
    pub daily_affiliation_solaris: i64,
    pub daily_affiliation_ventkids: i64,
    pub daily_affiliation_vox: i64,
    pub daily_affiliation_entrati: i64,
    pub daily_affiliation_necraloid: i64,
    pub daily_affiliation_zariman: i64,
    pub daily_affiliation_kahl: i64,
    pub daily_affiliation_cavia: i64,
    pub daily_affiliation_hex: i64,
    pub daily_focus: i64,
}

impl DailyAllowances {
    /// Refill every allowance for a player of the given mastery level.
    pub fn refill(&mut self, player_level: i32) {
        let standing = 16_000 + i64::from(player_level) * 500;
        for slot in [
            &mut self.daily_affiliation,
            &mut self.daily_affiliation_pvp,
            &mut self.daily_affiliation_library,
            &mut self.daily_affiliation_cetus,
            &mut self.daily_affiliation_quills,
            &mut self.daily_affiliation_solaris,
            &mut self.daily_affiliation_ventkids,
            &mut self.daily_affiliation_vox,
            &mut self.daily_affiliation_entrati,
            &mut self.daily_affiliation_necraloid,
            &mut self.daily_affiliation_zariman,
            &mut self.daily_affiliation_kahl,
            &mut self.daily_affiliation_cavia,
            &mut self.daily_affiliation_hex,
        ] {
            *slot = standing;
        }
        self.daily_focus = 250_000 + i64::from(player_level) * 5_000;
    }
}

/// Aggregate root: Inventory (one per account).
///
/// Mutated in memory by the primitives in [`crate::primitives`] and persisted
/// whole by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inventory {
    #[serde(rename = "accountOwnerId")]
    pub account_owner_id: AccountId,

    #[serde(default)]
    pub regular_credits: i64,
    #[serde(default)]
    pub premium_credits: i64,
    #[serde(default)]
    pub premium_credits_free: i64,
    #[serde(default)]
    pub fusion_points: i64,
    #[serde(default)]
    pub prime_tokens: i64,

    #[serde(default)]
    pub misc_items: CountedItems,
    #[serde(default)]
    pub recipes: CountedItems,
    #[serde(default)]
    pub consumables: CountedItems,
    #[serde(default)]
    pub level_keys: CountedItems,

    #[serde(default)]
    pub pending_recipes: IdentityMap<PendingRecipe>,
    #[serde(default)]
    pub affiliations: IdentityMap<Affiliation>,

    #[serde(default, rename = "OperatorLoadOuts")]
    pub operator_loadouts: IdentityMap<OperatorConfig>,
    #[serde(default, rename = "AdultOperatorLoadOuts")]
    pub adult_operator_loadouts: IdentityMap<OperatorConfig>,
    #[serde(default, rename = "KahlLoadOuts")]
    pub kahl_loadouts: IdentityMap<OperatorConfig>,

    #[serde(default, rename = "LoadOutPresets", skip_serializing_if = "Option::is_none")]
    pub loadout_presets: Option<LoadoutId>,
    #[serde(default, rename = "CurrentLoadOutIds")]
    pub current_loadout_ids: Vec<Oid>,
    #[serde(default)]
    pub equipped_gear: Vec<String>,
    #[serde(default)]
    pub equipped_emotes: Vec<String>,
    #[serde(default)]
    pub use_adult_operator_loadout: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,

    #[serde(default)]
    pub player_level: i32,
    #[serde(default, rename = "XPInfo")]
    pub xp_info: Vec<XpInfo>,

    #[serde(flatten)]
    pub daily: DailyAllowances,

    #[serde(flatten)]
    pub equipment: EquipmentInventory,
}

impl Inventory {
    /// A brand-new, empty inventory for an account.
    pub fn new(account_owner_id: AccountId) -> Self {
        Self {
            account_owner_id,
            regular_credits: 0,
            premium_credits: 0,
            premium_credits_free: 0,
            fusion_points: 0,
            prime_tokens: 0,
            misc_items: CountedItems::new(),
            recipes: CountedItems::new(),
            consumables: CountedItems::new(),
            level_keys: CountedItems::new(),
            pending_recipes: IdentityMap::new(),
            affiliations: IdentityMap::new(),
            operator_loadouts: IdentityMap::new(),
            adult_operator_loadouts: IdentityMap::new(),
            kahl_loadouts: IdentityMap::new(),
            loadout_presets: None,
            current_loadout_ids: Vec::new(),
            equipped_gear: Vec::new(),
            equipped_emotes: Vec::new(),
            use_adult_operator_loadout: false,
            guild_id: None,
            player_level: 0,
            xp_info: Vec::new(),
            daily: DailyAllowances::default(),
            equipment: EquipmentInventory::default(),
        }
    }

    pub fn currency(&self, kind: CurrencyKind) -> i64 {
        match kind {
            CurrencyKind::RegularCredits => self.regular_credits,
            CurrencyKind::PremiumCredits => self.premium_credits,
            CurrencyKind::PremiumCreditsFree => self.premium_credits_free,
            CurrencyKind::FusionPoints => self.fusion_points,
            CurrencyKind::PrimeTokens => self.prime_tokens,
        }
    }

    pub fn currency_mut(&mut self, kind: CurrencyKind) -> &mut i64 {
        match kind {
            CurrencyKind::RegularCredits => &mut self.regular_credits,
            CurrencyKind::PremiumCredits => &mut self.premium_credits,
            CurrencyKind::PremiumCreditsFree => &mut self.premium_credits_free,
            CurrencyKind::FusionPoints => &mut self.fusion_points,
            CurrencyKind::PrimeTokens => &mut self.prime_tokens,
        }
    }

    pub fn counted(&self, kind: CountedKind) -> &CountedItems {
        match kind {
            CountedKind::MiscItems => &self.misc_items,
            CountedKind::Recipes => &self.recipes,
            CountedKind::Consumables => &self.consumables,
            CountedKind::LevelKeys => &self.level_keys,
        }
    }

    pub fn counted_mut(&mut self, kind: CountedKind) -> &mut CountedItems {
        match kind {
            CountedKind::MiscItems => &mut self.misc_items,
            CountedKind::Recipes => &mut self.recipes,
            CountedKind::Consumables => &mut self.consumables,
            CountedKind::LevelKeys => &mut self.level_keys,
        }
    }

    /// Find the affiliation for `tag`, creating one with zero standing when the
    /// account has never interacted with that syndicate.
    pub fn affiliation_mut(&mut self, tag: &str) -> &mut Affiliation {
        self.affiliations
            .get_or_insert_with(tag.to_string(), || Affiliation::new(tag))
    }
}

impl AggregateRoot for Inventory {
    type Id = AccountId;

    const KIND: &'static str = "inventory";

    fn id(&self) -> &AccountId {
        &self.account_owner_id
    }
}
