//! Postgres-backed aggregate store.
//!
//! Every aggregate is one JSONB row in the `documents` table, keyed by
//! `(kind, key)`:
//!
//! | kind        | key                        |
//! |-------------|----------------------------|
//! | `account`   | account id                 |
//! | `inventory` | owning account id          |
//! | `loadout`   | owning account id          |
//! | `guild`     | guild id                   |
//!
//! Saves are upserts that replace the whole document.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | any query failure | `Backend` |
//! | JSON that no longer matches the type | `Decode` |

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use tracing::instrument;

use hearth_auth::Account;
use hearth_core::{AccountId, AggregateRoot, GuildId};
use hearth_inventory::{Guild, Inventory, Loadout};

use super::r#trait::{AggregateStore, StoreError};

const ACCOUNT_KIND: &str = "account";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    kind        TEXT        NOT NULL,
    key         TEXT        NOT NULL,
    document    JSONB       NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (kind, key)
)
"#;

/// Postgres document store.
///
/// `Send + Sync`; cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PostgresAggregateStore {
    pool: PgPool,
}

impl PostgresAggregateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the `documents` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| backend("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| backend("ensure_schema", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn load_document<T: DeserializeOwned>(&self, kind: &'static str, key: String) -> Result<Option<T>, StoreError> {
        let row = sqlx::query("SELECT document FROM documents WHERE kind = $1 AND key = $2")
            .bind(kind)
            .bind(&key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("load_document", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let document: JsonValue = row
            .try_get("document")
            .map_err(|e| backend("load_document", e))?;
        serde_json::from_value(document)
            .map(Some)
            .map_err(|e| StoreError::Decode {
                kind,
                message: e.to_string(),
            })
    }

    #[instrument(skip(self, value), err)]
    async fn save_document<T: Serialize + Sync>(
        &self,
        kind: &'static str,
        key: String,
        value: &T,
    ) -> Result<(), StoreError> {
        let document = serde_json::to_value(value).map_err(|e| StoreError::Encode {
            kind,
            message: e.to_string(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO documents (kind, key, document)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, key)
            DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(kind)
        .bind(&key)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| backend("save_document", e))?;
        Ok(())
    }
}

fn backend(operation: &'static str, err: sqlx::Error) -> StoreError {
    let message = match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => format!("{} (sqlstate {code})", db_err.message()),
            None => db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        other => other.to_string(),
    };
    StoreError::Backend { operation, message }
}

#[async_trait::async_trait]
impl AggregateStore for PostgresAggregateStore {
    async fn load_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        self.load_document(ACCOUNT_KIND, id.to_string()).await
    }

    async fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        self.save_document(ACCOUNT_KIND, account.id.to_string(), account).await
    }

    async fn load_inventory(&self, owner: AccountId) -> Result<Option<Inventory>, StoreError> {
        self.load_document(Inventory::KIND, owner.to_string()).await
    }

    async fn save_inventory(&self, inventory: &Inventory) -> Result<(), StoreError> {
        self.save_document(Inventory::KIND, inventory.account_owner_id.to_string(), inventory)
            .await
    }

    async fn load_loadout(&self, owner: AccountId) -> Result<Option<Loadout>, StoreError> {
        self.load_document(Loadout::KIND, owner.to_string()).await
    }

    async fn save_loadout(&self, loadout: &Loadout) -> Result<(), StoreError> {
        self.save_document(Loadout::KIND, loadout.owner.to_string(), loadout).await
    }

    async fn load_guild(&self, id: GuildId) -> Result<Option<Guild>, StoreError> {
        self.load_document(Guild::KIND, id.to_string()).await
    }

    async fn save_guild(&self, guild: &Guild) -> Result<(), StoreError> {
        self.save_document(Guild::KIND, guild.id.to_string(), guild).await
    }
}
