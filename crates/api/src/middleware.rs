use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use hearth_auth::Credentials;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

#[derive(Clone)]
pub struct SessionState {
    pub services: Arc<AppServices>,
}

/// Resolve `?accountId=…&nonce=…` to an [`AccountContext`].
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let credentials = match Query::<Credentials>::try_from_uri(req.uri()) {
        Ok(Query(credentials)) => credentials,
        Err(_) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "accountId and nonce query parameters are required",
            );
        }
    };

    let account_id = match state.services.authenticate(&credentials).await {
        Ok(id) => id,
        Err(e) => return errors::service_error_to_response(e),
    };

    req.extensions_mut().insert(AccountContext::new(account_id));
    next.run(req).await
}
