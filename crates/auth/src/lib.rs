//! `hearth-auth`: account identity and request credential checks.
//!
//! This crate is decoupled from HTTP and storage: callers look the account up
//! and hand it to [`verify_credentials`].

pub mod account;
pub mod credentials;

pub use account::{Account, Nonce};
pub use credentials::{AuthError, Credentials, verify_credentials};
