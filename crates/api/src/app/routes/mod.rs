use axum::{
    routing::{get, post},
    Router,
};

pub mod account;
pub mod catalog;
pub mod guild;
pub mod inventory;
pub mod loadout;
pub mod stats;
pub mod syndicate;
pub mod system;

/// Router for all session-authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api", api_router())
        .nest("/stats", stats::router())
        .route("/custom/addItems", post(inventory::add_items))
}

/// Game-client endpoints, mounted under `/api`.
fn api_router() -> Router {
    Router::new()
        .route("/inventory.php", get(inventory::get_inventory))
        .route("/claimCompletedRecipe.php", post(inventory::claim_completed_recipe))
        .route("/startRecipe.php", post(inventory::start_recipe))
        .route("/syndicateSacrifice.php", post(syndicate::syndicate_sacrifice))
        .route("/saveLoadout.php", post(loadout::save_loadout))
        .route("/createGuild.php", post(guild::create_guild))
}
