use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::AccountId;

/// Per-login session token the client echoes back on every request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(u64);

impl Nonce {
    /// Draw a fresh, non-zero nonce.
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        Self(u64::from_be_bytes(raw).max(1))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Nonce {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A player account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub email: String,
    #[serde(rename = "Nonce")]
    pub nonce: Nonce,
    /// Days since the Unix epoch of the last inventory fetch.
    #[serde(rename = "LastLoginDay", default, skip_serializing_if = "Option::is_none")]
    pub last_login_day: Option<i64>,
}

impl Account {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            nonce: Nonce::generate(),
            last_login_day: None,
        }
    }

    /// Start a new session, invalidating the previous nonce.
    pub fn rotate_nonce(&mut self) -> Nonce {
        self.nonce = Nonce::generate();
        self.nonce
    }
}
