use serde::{Deserialize, Serialize};

use bazaar_orders::NewOrder;
use bazaar_products::{NewProduct, ProductId};
use bazaar_reviews::NewReview;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner: String,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(body: CreateProductRequest) -> Self {
        NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
            owner: body.owner,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub buyer: String,
    pub quantity: i64,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(body: CreateOrderRequest) -> Self {
        NewOrder {
            product_id: ProductId::new(body.product_id),
            buyer: body.buyer,
            quantity: body.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: String,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(body: CreateReviewRequest) -> Self {
        NewReview {
            product_id: ProductId::new(body.product_id),
            reviewer: body.reviewer,
            rating: body.rating,
            comment: body.comment,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Collection response: `{"items": [...]}`.
#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}
