//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (lookups,
/// validation, state). Storage failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed request payload).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (account, aggregate, affiliation,
    /// loadout slot, equipment entry, syndicate definition...).
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not allowed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The item catalog has no entry for this item type.
    #[error("unknown item type: {0}")]
    UnknownItemType(String),

    /// No pending recipe with this id exists in the inventory.
    #[error("no pending recipe found with id {0}")]
    RecipeNotFound(String),

    /// The pending recipe's blueprint has no recipe definition.
    #[error("no recipe definition found for {0}")]
    RecipeDefinitionNotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn unknown_item_type(item_type: impl Into<String>) -> Self {
        Self::UnknownItemType(item_type.into())
    }

    /// Whether this error means "the addressed thing does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::RecipeNotFound(_) | Self::RecipeDefinitionNotFound(_)
        )
    }
}
