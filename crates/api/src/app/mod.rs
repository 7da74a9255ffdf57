//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/catalog wiring behind [`services::AppServices`]
//! - `routes/`: HTTP routes + handlers (one file per feature area)
//! - `dto.rs`: request/response DTOs and body parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let session_state = middleware::SessionState {
        services: services.clone(),
    };

    // Protected routes: require a valid accountId/nonce pair.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        session_state,
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/custom/createAccount", post(routes::account::create_account))
        .route("/custom/getItemLists", get(routes::catalog::get_item_lists))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
