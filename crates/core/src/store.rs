//! Record store capability.
//!
//! Each entity type gets its own keyed collection. Services only see this
//! trait; the backing store (in-memory, Postgres) is injected at wiring time.

use std::sync::Arc;

use thiserror::Error;

/// Durable keyed collection of serialized records.
///
/// Single-key operations are expected to be atomic. No multi-key transaction
/// is offered.
#[async_trait::async_trait]
pub trait RecordStore<V>: Send + Sync {
    /// Point lookup.
    async fn get(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Insert or overwrite the record under `key`.
    async fn put(&self, key: &str, value: V) -> Result<(), StoreError>;

    /// Delete and return the record under `key`, if any.
    async fn remove(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Every stored record, in the backend's enumeration order.
    async fn values(&self) -> Result<Vec<V>, StoreError>;
}

#[async_trait::async_trait]
impl<V, S> RecordStore<V> for Arc<S>
where
    V: Send + 'static,
    S: RecordStore<V> + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: V) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<Option<V>, StoreError> {
        (**self).remove(key).await
    }

    async fn values(&self) -> Result<Vec<V>, StoreError> {
        (**self).values().await
    }
}

/// Record store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not complete the operation (I/O, connection, lock).
    #[error("record store backend error: {0}")]
    Backend(String),

    /// A record could not be encoded to or decoded from its stored form.
    #[error("record codec error: {0}")]
    Codec(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
