//! Flow orchestrators.
//!
//! Each flow is a synchronous function over aggregates that the caller has
//! already loaded. Flows mutate those handles in place and return the response
//! body; persisting the result (once, after the flow succeeds) is the caller's
//! job.

pub mod account;
pub mod grant;
pub mod guild;
pub mod loadout;
pub mod recipe;
pub mod syndicate;
pub mod view;

pub use account::{apply_daily_reset, day_number, provision};
pub use grant::add_items;
pub use guild::{CreateGuildRequest, create_guild};
pub use loadout::{LoadoutSection, SaveLoadoutOutcome, SaveLoadoutRequest, parse_sections, save_loadout};
pub use recipe::{
    ClaimRecipe, ClaimRecipeRequest, ClaimRecipeResponse, StartRecipeRequest, StartRecipeResponse,
    claim_recipe, start_recipe,
};
pub use syndicate::{SyndicateSacrificeRequest, SyndicateSacrificeResponse, sacrifice};
pub use view::{ItemLists, ListedItem, StatsView, WeaponStat, inventory_view, item_lists, stats_view};
