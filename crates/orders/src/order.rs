use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{Entity, EntityId, Record, impl_entity_id};
use bazaar_products::ProductId;

/// Order identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl_entity_id!(OrderId);

/// A buyer's order for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Soft reference into the product collection.
    pub product_id: ProductId,
    pub buyer: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: ProductId,
    pub buyer: String,
    pub quantity: i64,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            product_id: self.product_id,
            buyer: self.buyer,
            quantity: self.quantity,
            created_at,
        }
    }
}
