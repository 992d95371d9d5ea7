//! Review board: create reviews and list them per product.
//!
//! Per-product listing is a linear scan over the whole review collection;
//! there is no secondary index on `product_id`.

use tracing::{debug, info};

use bazaar_core::{DomainResult, Platform, RecordStore};
use bazaar_products::ProductId;

use crate::review::{NewReview, Review, ReviewId};

#[derive(Debug, Clone)]
pub struct ReviewBoard<S> {
    store: S,
    platform: Platform,
}

impl<S> ReviewBoard<S>
where
    S: RecordStore<Review>,
{
    pub fn new(store: S, platform: Platform) -> Self {
        Self { store, platform }
    }

    /// Store a review as given; rating bounds and the product reference are
    /// not checked.
    pub async fn create(&self, input: NewReview) -> DomainResult<Review> {
        let id = ReviewId::from(self.platform.new_id());
        let review = input.into_review(id, self.platform.now());

        self.store.put(review.id.as_str(), review.clone()).await?;
        info!(
            review_id = %review.id,
            product_id = %review.product_id,
            rating = review.rating,
            "review created"
        );
        Ok(review)
    }

    /// Reviews whose `product_id` equals `product_id`; empty when none match.
    pub async fn list_by_product(&self, product_id: &ProductId) -> DomainResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .store
            .values()
            .await?
            .into_iter()
            .filter(|r| r.is_for(product_id))
            .collect();
        debug!(product_id = %product_id, count = reviews.len(), "listed reviews");
        Ok(reviews)
    }
}
