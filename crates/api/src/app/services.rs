//! Store + service construction.
//!
//! Each service owns its own collection; the stores are type-erased so the
//! in-memory and Postgres wirings share one `AppServices` type.

use std::sync::Arc;

use bazaar_core::{Platform, RecordStore, StoreError};
use bazaar_infra::StoreBackend;
use bazaar_infra::record_store::{self, InMemoryRecordStore, PostgresRecordStore};
use bazaar_orders::{Order, OrderLedger};
use bazaar_products::{CatalogService, Product};
use bazaar_reviews::{Review, ReviewBoard};

/// Type-erased record store for one entity collection.
pub type DynStore<V> = Arc<dyn RecordStore<V>>;

#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService<DynStore<Product>>,
    pub orders: OrderLedger<DynStore<Order>>,
    pub reviews: ReviewBoard<DynStore<Review>>,
}

impl AppServices {
    pub fn from_stores(
        products: DynStore<Product>,
        orders: DynStore<Order>,
        reviews: DynStore<Review>,
        platform: Platform,
    ) -> Self {
        Self {
            catalog: CatalogService::new(products, platform.clone()),
            orders: OrderLedger::new(orders, platform.clone()),
            reviews: ReviewBoard::new(reviews, platform),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(platform: Platform) -> Self {
        Self::from_stores(
            Arc::new(InMemoryRecordStore::<Product>::new()),
            Arc::new(InMemoryRecordStore::<Order>::new()),
            Arc::new(InMemoryRecordStore::<Review>::new()),
            platform,
        )
    }

    /// Postgres wiring: one pool shared by the three collections.
    pub async fn postgres(
        database_url: &str,
        max_connections: u32,
        platform: Platform,
    ) -> Result<Self, StoreError> {
        let pool = record_store::connect(database_url, max_connections).await?;
        record_store::ensure_schema(&pool).await?;

        Ok(Self::from_stores(
            Arc::new(PostgresRecordStore::<Product>::new(pool.clone())),
            Arc::new(PostgresRecordStore::<Order>::new(pool.clone())),
            Arc::new(PostgresRecordStore::<Review>::new(pool)),
            platform,
        ))
    }
}

pub async fn build_services(backend: &StoreBackend, platform: Platform) -> Result<AppServices, StoreError> {
    match backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory record stores");
            Ok(AppServices::in_memory(platform))
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "using postgres record stores");
            AppServices::postgres(database_url, *max_connections, platform).await
        }
    }
}
