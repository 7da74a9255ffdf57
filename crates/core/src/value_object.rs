//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Two value objects with the same attribute values are the same value. An
/// `(ItemType, ItemCount)` delta is a value object; a pending recipe with its
/// own id is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
