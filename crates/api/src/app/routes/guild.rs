use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use hearth_inventory::flows::CreateGuildRequest;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

pub async fn create_guild(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    body: Bytes,
) -> axum::response::Response {
    let request: CreateGuildRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.create_guild(account.account_id(), &request).await {
        Ok(guild) => (StatusCode::OK, Json(guild)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
