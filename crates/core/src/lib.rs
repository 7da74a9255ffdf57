//! `hearth-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! object identities, the domain error model and the aggregate/entity traits the
//! inventory crate builds on.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, GuildId, LoadoutId, Oid};
pub use value_object::ValueObject;
