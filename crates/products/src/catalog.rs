//! Catalog service: CRUD over the product collection.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use bazaar_core::{DomainError, DomainResult, Platform, RecordStore};

use crate::product::{NewProduct, Product, ProductId, ProductPatch};

/// CRUD over products, backed by an injected record store.
///
/// Update and delete on the same catalog are serialized through `writes`, so
/// an update can never write back a product that was deleted after it read.
/// Clones share the lock.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
    platform: Platform,
    writes: Arc<Mutex<()>>,
}

impl<S> CatalogService<S>
where
    S: RecordStore<Product>,
{
    pub fn new(store: S, platform: Platform) -> Self {
        Self {
            store,
            platform,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Stamp id + `created_at`, store, and return the full record.
    pub async fn create(&self, input: NewProduct) -> DomainResult<Product> {
        let id = ProductId::from(self.platform.new_id());
        let product = input.into_product(id, self.platform.now());

        self.store.put(product.id.as_str(), product.clone()).await?;
        info!(product_id = %product.id, owner = %product.owner, "product created");
        Ok(product)
    }

    /// Every stored product, in store enumeration order.
    pub async fn list_all(&self) -> DomainResult<Vec<Product>> {
        let products = self.store.values().await?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    pub async fn get(&self, id: &ProductId) -> DomainResult<Product> {
        debug!(product_id = %id, "get product");
        self.store
            .get(id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    /// Shallow-merge `patch` into the stored product and stamp `updated_at`.
    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let _guard = self.writes.lock().await;
        let mut product = self.get(id).await?;
        if patch.is_empty() {
            debug!(product_id = %id, "empty patch, refreshing updated_at only");
        }
        patch.apply(&mut product, self.platform.now());

        self.store.put(id.as_str(), product.clone()).await?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Remove and return the product.
    pub async fn delete(&self, id: &ProductId) -> DomainResult<Product> {
        let _guard = self.writes.lock().await;
        let removed = self
            .store
            .remove(id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))?;
        info!(product_id = %id, "product deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use bazaar_core::{ManualClock, SequentialIds, StoreError};
    use bazaar_infra::record_store::InMemoryRecordStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tokio::sync::Notify;

    use super::*;

    type Catalog = CatalogService<Arc<InMemoryRecordStore<Product>>>;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn catalog() -> (Catalog, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(t0()));
        let platform = Platform::new(clock.clone(), Arc::new(SequentialIds::new("p")));
        let service = CatalogService::new(Arc::new(InMemoryRecordStore::new()), platform);
        (service, clock)
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: "Turns things".to_string(),
            price: 9.99,
            owner: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (catalog, _) = catalog();
        let created = catalog.create(widget()).await.unwrap();

        assert_eq!(created.id.as_str(), "p-1");
        assert_eq!(created.created_at, t0());
        assert_eq!(created.updated_at, None);

        let fetched = catalog.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let (catalog, _) = catalog();
        let mut ids = HashSet::new();
        for _ in 0..25 {
            ids.insert(catalog.create(widget()).await.unwrap().id);
        }
        assert_eq!(ids.len(), 25);
        assert_eq!(catalog.list_all().await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn widget_update_and_delete_scenario() {
        let (catalog, clock) = catalog();
        let created = catalog.create(widget()).await.unwrap();

        clock.advance(Duration::minutes(10));
        let patch = ProductPatch {
            price: Some(12.5),
            ..ProductPatch::default()
        };
        let updated = catalog.update(&created.id, patch).await.unwrap();
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.owner, "alice");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, Some(t0() + Duration::minutes(10)));
        assert_eq!(catalog.get(&created.id).await.unwrap(), updated);

        let deleted = catalog.delete(&created.id).await.unwrap();
        assert_eq!(deleted, updated);

        let err = catalog.get(&created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn missing_id_fails_with_not_found() {
        let (catalog, _) = catalog();
        let ghost = ProductId::new("never-inserted");

        let get = catalog.get(&ghost).await.unwrap_err();
        assert_eq!(get, DomainError::NotFound("product never-inserted not found".to_string()));

        let update = catalog
            .update(&ghost, ProductPatch::default())
            .await
            .unwrap_err();
        assert!(update.is_not_found());

        let delete = catalog.delete(&ghost).await.unwrap_err();
        assert!(delete.is_not_found());

        assert!(catalog.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_leaves_other_products_alone() {
        let (catalog, _) = catalog();
        let keep = catalog.create(widget()).await.unwrap();
        let gone = catalog.create(widget()).await.unwrap();

        catalog.delete(&gone.id).await.unwrap();

        let remaining = catalog.list_all().await.unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[tokio::test]
    async fn permissive_values_are_stored_as_given() {
        let (catalog, _) = catalog();
        let created = catalog
            .create(NewProduct {
                name: String::new(),
                description: String::new(),
                price: -3.0,
                owner: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(catalog.get(&created.id).await.unwrap().price, -3.0);
    }

    /// In-memory store whose next `get` holds its result until `release` fires.
    #[derive(Debug, Default)]
    struct HeldReadStore {
        inner: InMemoryRecordStore<Product>,
        hold_next_read: AtomicBool,
        read_taken: Notify,
        release: Notify,
    }

    #[async_trait]
    impl RecordStore<Product> for HeldReadStore {
        async fn get(&self, key: &str) -> Result<Option<Product>, StoreError> {
            let found = self.inner.get(key).await?;
            if self.hold_next_read.swap(false, Ordering::SeqCst) {
                self.read_taken.notify_one();
                self.release.notified().await;
            }
            Ok(found)
        }

        async fn put(&self, key: &str, value: Product) -> Result<(), StoreError> {
            self.inner.put(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<Option<Product>, StoreError> {
            self.inner.remove(key).await
        }

        async fn values(&self) -> Result<Vec<Product>, StoreError> {
            self.inner.values().await
        }
    }

    #[tokio::test]
    async fn delete_racing_an_update_stays_deleted() {
        let store = Arc::new(HeldReadStore::default());
        let platform = Platform::new(
            Arc::new(ManualClock::new(t0())),
            Arc::new(SequentialIds::new("p")),
        );
        let catalog = CatalogService::new(store.clone(), platform);
        let created = catalog.create(widget()).await.unwrap();

        store.hold_next_read.store(true, Ordering::SeqCst);
        let updating = tokio::spawn({
            let catalog = catalog.clone();
            let id = created.id.clone();
            async move {
                let patch = ProductPatch {
                    price: Some(2.0),
                    ..ProductPatch::default()
                };
                catalog.update(&id, patch).await
            }
        });
        store.read_taken.notified().await;

        let deleting = tokio::spawn({
            let catalog = catalog.clone();
            let id = created.id.clone();
            async move { catalog.delete(&id).await }
        });
        tokio::task::yield_now().await;
        store.release.notify_one();

        assert_eq!(updating.await.unwrap().unwrap().price, 2.0);
        assert_eq!(deleting.await.unwrap().unwrap().price, 2.0);
        assert!(catalog.get(&created.id).await.unwrap_err().is_not_found());
        assert!(catalog.list_all().await.unwrap().is_empty());
    }

    /// Store whose backend is always down.
    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl RecordStore<Product> for UnreachableStore {
        async fn get(&self, _key: &str) -> Result<Option<Product>, StoreError> {
            Err(StoreError::backend("connection refused"))
        }

        async fn put(&self, _key: &str, _value: Product) -> Result<(), StoreError> {
            Err(StoreError::backend("connection refused"))
        }

        async fn remove(&self, _key: &str) -> Result<Option<Product>, StoreError> {
            Err(StoreError::backend("connection refused"))
        }

        async fn values(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::backend("connection refused"))
        }
    }

    #[tokio::test]
    async fn backend_failures_surface_as_storage_errors() {
        let catalog = CatalogService::new(UnreachableStore, Platform::default());
        let id = ProductId::new("p-1");

        let results = [
            catalog.create(widget()).await.map(|_| ()),
            catalog.list_all().await.map(|_| ()),
            catalog.get(&id).await.map(|_| ()),
            catalog.update(&id, ProductPatch::default()).await.map(|_| ()),
            catalog.delete(&id).await.map(|_| ()),
        ];
        for result in results {
            match result {
                Err(DomainError::Storage(msg)) => assert!(msg.contains("connection refused")),
                other => panic!("expected storage failure, got {other:?}"),
            }
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_patch() -> impl Strategy<Value = ProductPatch> {
            (
                proptest::option::of("[A-Za-z ]{0,20}"),
                proptest::option::of("[A-Za-z ]{0,40}"),
                proptest::option::of(-1_000.0f64..1_000.0),
                proptest::option::of("[a-z]{1,10}"),
            )
                .prop_map(|(name, description, price, owner)| ProductPatch {
                    name,
                    description,
                    price,
                    owner,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: fields missing from the patch are untouched; updated_at always refreshes.
            #[test]
            fn update_preserves_unseen_fields(patch in arb_patch()) {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                rt.block_on(async {
                    let (catalog, clock) = catalog();
                    let before = catalog.create(widget()).await.unwrap();
                    clock.advance(Duration::seconds(1));

                    let after = catalog.update(&before.id, patch.clone()).await.unwrap();

                    prop_assert_eq!(&after.id, &before.id);
                    prop_assert_eq!(after.created_at, before.created_at);
                    prop_assert_eq!(after.updated_at, Some(t0() + Duration::seconds(1)));
                    prop_assert_eq!(&after.name, patch.name.as_ref().unwrap_or(&before.name));
                    prop_assert_eq!(
                        &after.description,
                        patch.description.as_ref().unwrap_or(&before.description)
                    );
                    prop_assert_eq!(after.price, patch.price.unwrap_or(before.price));
                    prop_assert_eq!(&after.owner, patch.owner.as_ref().unwrap_or(&before.owner));
                    Ok(())
                })?;
            }
        }
    }
}
