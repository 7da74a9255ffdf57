use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use hearth_inventory::flows::SyndicateSacrificeRequest;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

pub async fn syndicate_sacrifice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
    body: Bytes,
) -> axum::response::Response {
    let request: SyndicateSacrificeRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.syndicate_sacrifice(account.account_id(), &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
