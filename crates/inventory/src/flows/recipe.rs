//! Crafting: start a blueprint build, claim (or cancel) a finished one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use hearth_core::{DomainError, DomainResult, Oid};

use crate::catalog::ItemCatalog;
use crate::changes::InventoryChanges;
use crate::collection::TypeCount;
use crate::inventory::{Inventory, PendingRecipe};
use crate::primitives::{add_item, add_misc_items, add_recipes, adjust_currency};

/// Body of a claim request; only the first id is claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClaimRecipeRequest {
    pub recipe_ids: Vec<Oid>,
}

/// Inputs of one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRecipe {
    pub recipe_id: Oid,
    pub cancel: bool,
    pub rush: bool,
}

/// Outcome of a claim.
///
/// A cancellation answers with the refund at the top level; a completed claim
/// answers with the usual `{"InventoryChanges": …}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimRecipeResponse {
    Cancelled(InventoryChanges),
    Completed {
        #[serde(rename = "InventoryChanges")]
        inventory_changes: InventoryChanges,
    },
}

impl ClaimRecipeResponse {
    pub fn changes(&self) -> &InventoryChanges {
        match self {
            Self::Cancelled(changes) => changes,
            Self::Completed { inventory_changes } => inventory_changes,
        }
    }
}

/// Claim a pending recipe.
///
/// The pending entry is removed as soon as it is found, before the recipe
/// definition is resolved. Completion time is not checked.
pub fn claim_recipe(
    inventory: &mut Inventory,
    catalog: &dyn ItemCatalog,
    claim: ClaimRecipe,
) -> DomainResult<ClaimRecipeResponse> {
    let pending = inventory
        .pending_recipes
        .remove(&claim.recipe_id)
        .ok_or_else(|| DomainError::RecipeNotFound(claim.recipe_id.to_string()))?;

    let recipe = catalog
        .recipe(&pending.item_type)
        .ok_or_else(|| DomainError::RecipeDefinitionNotFound(pending.item_type.clone()))?;

    if claim.cancel {
        tracing::debug!(recipe_id = %claim.recipe_id, item_type = %pending.item_type, "cancelling recipe");
        let refund = adjust_currency(inventory, recipe.build_price, false)?
            .combine(add_misc_items(inventory, &recipe.ingredients)?);
        return Ok(ClaimRecipeResponse::Cancelled(refund));
    }

    tracing::debug!(
        recipe_id = %claim.recipe_id,
        item_type = %pending.item_type,
        result_type = %recipe.result_type,
        rush = claim.rush,
        "claiming recipe"
    );

    let mut changes = InventoryChanges::new();
    if recipe.consume_on_use {
        changes.merge(add_recipes(inventory, &[TypeCount::new(&pending.item_type, -1)])?);
    }
    if claim.rush {
        changes.merge(adjust_currency(inventory, recipe.skip_build_time_price.saturating_neg(), true)?);
    }
    changes.merge(add_item(inventory, catalog, &recipe.result_type, recipe.num)?);

    Ok(ClaimRecipeResponse::Completed {
        inventory_changes: changes,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartRecipeRequest {
    pub recipe_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartRecipeResponse {
    pub recipe_id: Oid,
}

/// Pay for a blueprint build and queue it.
pub fn start_recipe(
    inventory: &mut Inventory,
    catalog: &dyn ItemCatalog,
    recipe_name: &str,
    now: DateTime<Utc>,
) -> DomainResult<StartRecipeResponse> {
    let recipe = catalog
        .recipe(recipe_name)
        .ok_or_else(|| DomainError::RecipeDefinitionNotFound(recipe_name.to_string()))?;

    adjust_currency(inventory, recipe.build_price.saturating_neg(), false)?;
    let consumed: Vec<TypeCount> = recipe.ingredients.iter().map(TypeCount::negated).collect();
    add_misc_items(inventory, &consumed)?;

    let pending = PendingRecipe {
        item_id: Oid::new(),
        item_type: recipe_name.to_string(),
        completion_date: now + Duration::seconds(recipe.build_time),
    };
    let recipe_id = pending.item_id;
    inventory.pending_recipes.insert(pending);

    tracing::debug!(%recipe_id, recipe_name, "recipe started");
    Ok(StartRecipeResponse { recipe_id })
}
