use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse};

use hearth_inventory::flows::SaveLoadoutRequest;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

/// Responds with the hex id minted for new loadout configs, or an empty body.
pub async fn save_loadout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    body: Bytes,
) -> axum::response::Response {
    let request: SaveLoadoutRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.save_loadout(account.account_id(), request).await {
        Ok(outcome) => {
            let body = outcome.new_loadout_id.map(|id| id.to_hex()).unwrap_or_default();
            (StatusCode::OK, body).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
