//! Aggregate root trait for document-shaped domain models.

/// Aggregate root marker + minimal interface.
///
/// An aggregate is persisted as one document and is always loaded and saved
/// whole. Stores use `KIND` to keep documents of different aggregate types
/// apart and `id()` as the document key.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Stable document kind (e.g. `"inventory"`).
    const KIND: &'static str;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
