use serde::{Deserialize, Serialize};
use thiserror::Error;

use hearth_core::AccountId;

use crate::{Account, Nonce};

/// Raw credentials as they arrive on a request (`?accountId=…&nonce=…`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub account_id: String,
    pub nonce: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

impl AuthError {
    fn invalid_pair() -> Self {
        Self::Unauthenticated("invalid accountId-nonce pair".to_string())
    }
}

impl Credentials {
    /// Parse the account id. A malformed id can never authenticate.
    pub fn account_id(&self) -> Result<AccountId, AuthError> {
        self.account_id.parse().map_err(|_| AuthError::invalid_pair())
    }

    fn nonce(&self) -> Result<Nonce, AuthError> {
        self.nonce
            .parse::<u64>()
            .map(Nonce::from_raw)
            .map_err(|_| AuthError::invalid_pair())
    }
}

/// Check request credentials against the stored account.
///
/// - No IO
/// - `account` is whatever the caller found for `credentials.account_id()`
pub fn verify_credentials(credentials: &Credentials, account: Option<&Account>) -> Result<AccountId, AuthError> {
    let account_id = credentials.account_id()?;
    let nonce = credentials.nonce()?;

    match account {
        Some(account) if account.id == account_id && account.nonce == nonce && nonce.value() != 0 => {
            Ok(account.id)
        }
        _ => {
            tracing::debug!(account_id = %account_id, "credential check failed");
            Err(AuthError::invalid_pair())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_for(account: &Account) -> Credentials {
        Credentials {
            account_id: account.id.to_string(),
            nonce: account.nonce.to_string(),
        }
    }

    #[test]
    fn matching_pair_resolves_to_account() {
        let account = Account::new("tenno@example.com");
        let resolved = verify_credentials(&credentials_for(&account), Some(&account)).unwrap();
        assert_eq!(resolved, account.id);
    }

    #[test]
    fn stale_nonce_is_rejected() {
        let mut account = Account::new("tenno@example.com");
        let old = credentials_for(&account);
        account.rotate_nonce();

        let err = verify_credentials(&old, Some(&account)).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }

    #[test]
    fn missing_account_or_garbage_is_rejected() {
        let account = Account::new("tenno@example.com");
        assert!(verify_credentials(&credentials_for(&account), None).is_err());

        let garbage = Credentials {
            account_id: "not-an-id".into(),
            nonce: "1".into(),
        };
        assert!(verify_credentials(&garbage, Some(&account)).is_err());

        let zero = Credentials {
            account_id: account.id.to_string(),
            nonce: "0".into(),
        };
        assert!(verify_credentials(&zero, Some(&account)).is_err());
    }
}
