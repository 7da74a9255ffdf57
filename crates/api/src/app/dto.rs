use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `?cancel=…&rush=…` on claimCompletedRecipe. Any non-empty value sets the flag.
#[derive(Debug, Default, Deserialize)]
pub struct ClaimRecipeQuery {
    pub cancel: Option<String>,
    pub rush: Option<String>,
}

impl ClaimRecipeQuery {
    pub fn cancel(&self) -> bool {
        is_set(self.cancel.as_deref())
    }

    pub fn rush(&self) -> bool {
        is_set(self.rush.as_deref())
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub account_id: String,
    pub nonce: String,
}

/// Parse a JSON body regardless of the declared content type.
///
/// Game clients post JSON as `text/plain` or form data, so the body is read
/// raw instead of through `axum::Json`.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, axum::response::Response> {
    serde_json::from_slice(body).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", format!("malformed request body: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_need_a_non_empty_value() {
        let q = ClaimRecipeQuery {
            cancel: Some("1".into()),
            rush: Some(String::new()),
        };
        assert!(q.cancel());
        assert!(!q.rush());
        assert!(!ClaimRecipeQuery::default().cancel());
    }

    #[test]
    fn malformed_body_is_rejected() {
        let result: Result<CreateAccountRequest, _> = parse_body(&Bytes::from_static(b"{not json"));
        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }
}
