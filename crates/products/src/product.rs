use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{Entity, EntityId, Record, impl_entity_id};

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl_entity_id!(ProductId);

/// A catalog listing.
///
/// `price` is stored as given; negative prices are not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
}

/// Caller-supplied fields for a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner: String,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            owner: self.owner,
            created_at,
            updated_at: None,
        }
    }
}

/// Partial update of a product.
///
/// Only the mutable listing fields are patchable; `id` and `createdAt` are
/// not part of the patch, so a stored product keeps both for its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.owner.is_none()
    }

    /// Shallow merge: every present field overwrites the stored one, then
    /// `updated_at` is stamped unconditionally.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(owner) = self.owner {
            product.owner = owner;
        }
        product.updated_at = Some(now);
    }
}
