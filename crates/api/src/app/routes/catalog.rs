use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;

/// `GET /custom/getItemLists`. Unauthenticated; catalog items grouped for the
/// item picker.
pub async fn get_item_lists(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    (StatusCode::OK, Json(services.item_lists())).into_response()
}
