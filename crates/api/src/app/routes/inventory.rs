use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use hearth_inventory::flows::{ClaimRecipe, ClaimRecipeRequest, StartRecipeRequest};
use hearth_inventory::TypeCount;

use crate::app::dto::{self, ClaimRecipeQuery};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
) -> axum::response::Response {
    match services.inventory_view(account.account_id()).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn claim_completed_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    Query(query): Query<ClaimRecipeQuery>,
    body: Bytes,
) -> axum::response::Response {
    let request: ClaimRecipeRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let Some(&recipe_id) = request.recipe_ids.first() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "RecipeIds must not be empty");
    };

    let claim = ClaimRecipe {
        recipe_id,
        cancel: query.cancel(),
        rush: query.rush(),
    };

    match services.claim_completed_recipe(account.account_id(), claim).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn start_recipe(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    body: Bytes,
) -> axum::response::Response {
    let request: StartRecipeRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.start_recipe(account.account_id(), &request.recipe_name).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `POST /custom/addItems` with a body of `[{ItemType, ItemCount}, …]`.
pub async fn add_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    body: Bytes,
) -> axum::response::Response {
    let entries: Vec<TypeCount> = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.add_items(account.account_id(), &entries).await {
        Ok(changes) => (StatusCode::OK, Json(serde_json::json!({ "InventoryChanges": changes }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
