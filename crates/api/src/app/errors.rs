use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use hearth_core::DomainError;
use hearth_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Auth(e) => json_error(StatusCode::UNAUTHORIZED, "unauthenticated", e.to_string()),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::RecipeNotFound(_) => json_error(StatusCode::NOT_FOUND, "recipe_not_found", message),
        DomainError::RecipeDefinitionNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "recipe_definition_not_found", message)
        }
        DomainError::UnknownItemType(_) => json_error(StatusCode::BAD_REQUEST, "unknown_item_type", message),
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::InvalidState(_) => json_error(StatusCode::CONFLICT, "invalid_state", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
