//! Aggregate persistence boundary.
//!
//! Accounts, inventories, loadouts and guilds are stored as whole documents.
//! A flow loads what it needs, mutates in memory and saves each touched
//! aggregate once.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAggregateStore;
pub use postgres::PostgresAggregateStore;
pub use r#trait::{AggregateStore, StoreError};
