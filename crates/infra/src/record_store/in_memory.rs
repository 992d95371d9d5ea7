use std::collections::BTreeMap;
use std::sync::RwLock;

use bazaar_core::{RecordStore, StoreError};

/// In-memory keyed collection for tests/dev.
///
/// Enumeration follows key order.
#[derive(Debug)]
pub struct InMemoryRecordStore<V> {
    inner: RwLock<BTreeMap<String, V>>,
}

impl<V> InMemoryRecordStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<V> Default for InMemoryRecordStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

#[async_trait::async_trait]
impl<V> RecordStore<V> for InMemoryRecordStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(key))
    }

    async fn values(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}
