//! Infrastructure layer: persistence, per-account locking, config, and the
//! service that runs inventory flows against a store.

pub mod config;
pub mod locks;
pub mod service;
pub mod store;


pub use config::{AppConfig, ConfigError};
pub use locks::AccountLocks;
pub use service::{InventoryService, ServiceError, ServiceResult};
pub use store::{AggregateStore, InMemoryAggregateStore, PostgresAggregateStore, StoreError};
