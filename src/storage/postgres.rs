//! Postgres storage backend over the `kv_store` table.
//!
//! Each resource is one row keyed by `ResourceKey::as_str()`; writes are
//! single-statement upserts, so a `set` either fully replaces the value or
//! leaves the previous one in place.

use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use super::{ResourceKey, StorageClient, StorageError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl StorageClient for PgStore {
    async fn get(&self, key: ResourceKey) -> Result<Option<Value>, StorageError> {
        let row = sqlx::query_as::<_, (Value,)>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: ResourceKey, value: Value) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, now())
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key.as_str())
        .bind(&value)
        .execute(&self.pool)
        .await?;
        debug!(%key, "kv_store upserted");
        Ok(())
    }
}
