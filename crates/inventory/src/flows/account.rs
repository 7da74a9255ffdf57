//! Account-lifetime bookkeeping: provisioning and the daily reset.

use chrono::{DateTime, Utc};

use hearth_core::AccountId;

use crate::inventory::Inventory;
use crate::loadout::Loadout;

const SECONDS_PER_DAY: i64 = 86_400;

/// Days since the Unix epoch; the unit of `LastLoginDay`.
pub fn day_number(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(SECONDS_PER_DAY)
}

/// Empty inventory plus an empty loadout linked through `LoadOutPresets`.
pub fn provision(account_id: AccountId) -> (Inventory, Loadout) {
    let loadout = Loadout::new(account_id);
    let mut inventory = Inventory::new(account_id);
    inventory.loadout_presets = Some(loadout.id);
    (inventory, loadout)
}

/// Refill daily allowances when the last login was on another day.
///
/// Returns `true` when the reset ran; the caller then records `today` as the
/// account's last login day and persists both aggregates.
pub fn apply_daily_reset(inventory: &mut Inventory, last_login_day: Option<i64>, today: i64) -> bool {
    if last_login_day == Some(today) {
        return false;
    }
    inventory.daily.refill(inventory.player_level);
    tracing::debug!(account_id = %inventory.account_owner_id, today, "daily allowances refilled");
    true
}
