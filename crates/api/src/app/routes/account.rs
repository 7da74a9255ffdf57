use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto::{self, CreateAccountRequest, CreateAccountResponse};
use crate::app::errors;
use crate::app::services::AppServices;

/// `POST /custom/createAccount`. Unauthenticated; answers with the session
/// credentials for the new account.
pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let request: CreateAccountRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    if request.email.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "email must not be empty");
    }

    match services.create_account(&request.email).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(CreateAccountResponse {
                account_id: account.id.to_string(),
                nonce: account.nonce.to_string(),
            }),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
