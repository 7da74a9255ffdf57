//! Syndicate rank-up ("sacrifice").

use serde::{Deserialize, Serialize};

use hearth_core::{DomainError, DomainResult};

use crate::acquisition::AcquisitionService;
use crate::catalog::SyndicateCatalog;
use crate::changes::InventoryChanges;
use crate::collection::TypeCount;
use crate::inventory::Inventory;
use crate::primitives::{add_misc_items, adjust_currency};

const EPISODE_REWARD_SYNDICATE: &str = "RadioLegionIntermission9Syndicate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyndicateSacrificeRequest {
    pub affiliation_tag: String,
    pub sacrifice_level: i32,
    #[serde(default)]
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyndicateSacrificeResponse {
    pub affiliation_tag: String,
    pub inventory_changes: InventoryChanges,
    pub level: i32,
    pub level_increase: i32,
    pub new_episode_reward: bool,
}

/// Advance one syndicate title.
///
/// `LevelIncrease` reports the catch-up distance to the requested level while
/// the stored title always moves by exactly one.
pub fn sacrifice(
    inventory: &mut Inventory,
    syndicates: &dyn SyndicateCatalog,
    acquisition: &dyn AcquisitionService,
    request: &SyndicateSacrificeRequest,
) -> DomainResult<SyndicateSacrificeResponse> {
    let tag = request.affiliation_tag.as_str();
    let syndicate = syndicates
        .syndicate(tag)
        .ok_or_else(|| DomainError::not_found(format!("syndicate {tag}")))?;

    if request.sacrifice_level < 0 {
        return Err(DomainError::validation(format!(
            "sacrifice level {} is negative",
            request.sacrifice_level
        )));
    }

    let affiliation = inventory.affiliation_mut(tag);
    let current_title = affiliation.title.unwrap_or(0);
    let level_increase = request.sacrifice_level.saturating_sub(current_title).max(1);

    let (sacrifice, reward) = if request.sacrifice_level == 0 {
        affiliation.initiated = true;
        (
            syndicate.initiation_sacrifice.as_ref(),
            syndicate.initiation_reward.as_deref(),
        )
    } else {
        (syndicate.title_sacrifice(request.sacrifice_level), None)
    };

    let new_title = current_title.saturating_add(1);
    affiliation.title = Some(new_title);
    if !syndicate.favours.is_empty() && !affiliation.free_favors_earned.contains(&new_title) {
        affiliation.free_favors_earned.push(new_title);
    }

    let mut changes = InventoryChanges::new();
    if let Some(sacrifice) = sacrifice {
        changes.merge(adjust_currency(inventory, sacrifice.credits.saturating_neg(), false)?);
        let consumed: Vec<TypeCount> = sacrifice.items.iter().map(TypeCount::negated).collect();
        changes.merge(add_misc_items(inventory, &consumed)?);
    }
    if let Some(reward) = reward {
        changes.merge(acquisition.grant(reward, inventory)?);
    }

    tracing::debug!(
        tag,
        requested = request.sacrifice_level,
        title = new_title,
        level_increase,
        "syndicate sacrifice"
    );

    Ok(SyndicateSacrificeResponse {
        affiliation_tag: request.affiliation_tag.clone(),
        inventory_changes: changes,
        level: request.sacrifice_level,
        level_increase,
        new_episode_reward: tag == EPISODE_REWARD_SYNDICATE,
    })
}
