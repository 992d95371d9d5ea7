//! Order ledger: create + enumerate. Orders are never updated or deleted.

use tracing::{debug, info};

use bazaar_core::{DomainResult, Platform, RecordStore};

use crate::order::{NewOrder, Order, OrderId};

#[derive(Debug, Clone)]
pub struct OrderLedger<S> {
    store: S,
    platform: Platform,
}

impl<S> OrderLedger<S>
where
    S: RecordStore<Order>,
{
    pub fn new(store: S, platform: Platform) -> Self {
        Self { store, platform }
    }

    /// Record an order as given. Neither the product reference nor the
    /// quantity is checked.
    pub async fn create(&self, input: NewOrder) -> DomainResult<Order> {
        let id = OrderId::from(self.platform.new_id());
        let order = input.into_order(id, self.platform.now());

        self.store.put(order.id.as_str(), order.clone()).await?;
        info!(
            order_id = %order.id,
            product_id = %order.product_id,
            quantity = order.quantity,
            "order created"
        );
        Ok(order)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Order>> {
        let orders = self.store.values().await?;
        debug!(count = orders.len(), "listed orders");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use bazaar_core::{ManualClock, SequentialIds};
    use bazaar_infra::record_store::InMemoryRecordStore;
    use bazaar_products::ProductId;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn ledger() -> OrderLedger<Arc<InMemoryRecordStore<Order>>> {
        let start = Utc.with_ymd_and_hms(2024, 7, 4, 10, 0, 0).unwrap();
        let platform = Platform::new(
            Arc::new(ManualClock::new(start)),
            Arc::new(SequentialIds::new("o")),
        );
        OrderLedger::new(Arc::new(InMemoryRecordStore::new()), platform)
    }

    fn order_for(product: &str, quantity: i64) -> NewOrder {
        NewOrder {
            product_id: ProductId::new(product),
            buyer: "bob".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn create_stamps_id_and_timestamp() {
        let ledger = ledger();
        let order = ledger.create(order_for("p-1", 2)).await.unwrap();

        assert_eq!(order.id.as_str(), "o-1");
        assert_eq!(order.product_id.as_str(), "p-1");
        assert_eq!(order.buyer, "bob");
        assert_eq!(order.quantity, 2);
        assert_eq!(
            order.created_at,
            Utc.with_ymd_and_hms(2024, 7, 4, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn list_returns_every_order() {
        let ledger = ledger();
        let a = ledger.create(order_for("p-1", 1)).await.unwrap();
        let b = ledger.create(order_for("p-2", 3)).await.unwrap();

        let mut all = ledger.list_all().await.unwrap();
        all.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn created_order_ids_are_unique() {
        let ledger = OrderLedger::new(
            Arc::new(InMemoryRecordStore::<Order>::new()),
            Platform::system(),
        );
        let mut ids = HashSet::new();
        for qty in 0..40 {
            ids.insert(ledger.create(order_for("p-1", qty)).await.unwrap().id);
        }
        assert_eq!(ids.len(), 40);
        assert_eq!(ledger.list_all().await.unwrap().len(), 40);
    }

    #[tokio::test]
    async fn dangling_product_and_odd_quantities_are_accepted() {
        let ledger = ledger();
        let zero = ledger.create(order_for("no-such-product", 0)).await.unwrap();
        let negative = ledger.create(order_for("no-such-product", -4)).await.unwrap();

        assert_eq!(zero.quantity, 0);
        assert_eq!(negative.quantity, -4);
        assert_eq!(ledger.list_all().await.unwrap().len(), 2);
    }

    #[test]
    fn order_json_uses_camel_case() {
        let order = order_for("p-9", 1).into_order(
            OrderId::new("o-9"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["productId"], "p-9");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
    }
}
