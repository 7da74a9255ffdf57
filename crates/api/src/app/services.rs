//! Infrastructure wiring: aggregate store + catalog → [`AppServices`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use hearth_infra::{AggregateStore, AppConfig, InMemoryAggregateStore, InventoryService, PostgresAggregateStore, StoreError};
use hearth_inventory::{CatalogError, StaticCatalog};

/// The service every handler talks to. The store backend is picked at startup.
pub type AppServices = InventoryService<Arc<dyn AggregateStore>>;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Build services from configuration.
///
/// `DATABASE_URL` set → Postgres document store, otherwise in-memory.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, BootstrapError> {
    let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);

    let store: Arc<dyn AggregateStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("using postgres aggregate store");
            Arc::new(PostgresAggregateStore::connect(url).await?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory aggregate store");
            Arc::new(InMemoryAggregateStore::new())
        }
    };

    Ok(InventoryService::new(store, catalog))
}

/// In-memory services over the given catalog (tests, local runs).
pub fn build_in_memory_services(catalog: StaticCatalog) -> AppServices {
    let store: Arc<dyn AggregateStore> = Arc::new(InMemoryAggregateStore::new());
    InventoryService::new(store, Arc::new(catalog))
}

fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog, BootstrapError> {
    let Some(path) = path else {
        return Ok(StaticCatalog::builtin()?);
    };
    let raw = std::fs::read_to_string(path).map_err(|source| BootstrapError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loading catalog");
    Ok(StaticCatalog::from_json_str(&raw)?)
}
