use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{Entity, EntityId, Record, impl_entity_id};
use bazaar_products::ProductId;

/// Review identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub EntityId);

impl_entity_id!(ReviewId);

/// A reviewer's rating and comment on a product.
///
/// `rating` is meant to be 1-5 but is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_for(&self, product_id: &ProductId) -> bool {
        &self.product_id == product_id
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Review {
    const COLLECTION: &'static str = "reviews";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: ProductId,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
}

impl NewReview {
    pub fn into_review(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            product_id: self.product_id,
            reviewer: self.reviewer,
            rating: self.rating,
            comment: self.comment,
            created_at,
        }
    }
}
