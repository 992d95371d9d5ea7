//! Postgres-backed record store.
//!
//! All collections share one table keyed by `(collection, id)`; the record
//! body is the entity's JSON form stored as JSONB. The collection name comes
//! from the value type's [`Record::COLLECTION`].
//!
//! ## Error Mapping
//!
//! | Source | StoreError |
//! |--------|------------|
//! | sqlx (connection, pool, database) | `Backend` |
//! | serde_json (encode/decode body) | `Codec` |

use std::marker::PhantomData;

use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use bazaar_core::{Record, RecordStore, StoreError};

const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body JSONB NOT NULL,
    PRIMARY KEY (collection, id)
)
"#;

/// Open a connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

/// Create the shared `records` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_RECORDS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    Ok(())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    StoreError::backend(format!("{operation}: {err}"))
}

fn decode<V: Record>(body: JsonValue) -> Result<V, StoreError> {
    Ok(serde_json::from_value(body)?)
}

/// One entity collection stored in Postgres.
///
/// Cloning is cheap (shares the pool).
pub struct PostgresRecordStore<V> {
    pool: PgPool,
    _record: PhantomData<fn() -> V>,
}

impl<V> Clone for PostgresRecordStore<V> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

impl<V> core::fmt::Debug for PostgresRecordStore<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgresRecordStore").finish_non_exhaustive()
    }
}

impl<V: Record> PostgresRecordStore<V> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<V: Record> RecordStore<V> for PostgresRecordStore<V> {
    async fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        let row = sqlx::query("SELECT body FROM records WHERE collection = $1 AND id = $2")
            .bind(V::COLLECTION)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        match row {
            Some(row) => {
                let body: JsonValue = row
                    .try_get("body")
                    .map_err(|e| map_sqlx_error("get", e))?;
                Ok(Some(decode(body)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: V) -> Result<(), StoreError> {
        let body = serde_json::to_value(&value)?;
        sqlx::query(
            r#"
            INSERT INTO records (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body
            "#,
        )
        .bind(V::COLLECTION)
        .bind(key)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("put", e))?;

        debug!(collection = V::COLLECTION, key, "record stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<V>, StoreError> {
        let row = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2 RETURNING body")
            .bind(V::COLLECTION)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove", e))?;

        match row {
            Some(row) => {
                let body: JsonValue = row
                    .try_get("body")
                    .map_err(|e| map_sqlx_error("remove", e))?;
                Ok(Some(decode(body)?))
            }
            None => Ok(None),
        }
    }

    async fn values(&self) -> Result<Vec<V>, StoreError> {
        let rows = sqlx::query("SELECT body FROM records WHERE collection = $1 ORDER BY id")
            .bind(V::COLLECTION)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("values", e))?;

        rows.into_iter()
            .map(|row| {
                let body: JsonValue = row
                    .try_get("body")
                    .map_err(|e| map_sqlx_error("values", e))?;
                decode(body)
            })
            .collect()
    }
}
