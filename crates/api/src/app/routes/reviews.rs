use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use bazaar_products::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /reviews`. Listing lives under `/products/:id/reviews`.
pub fn router() -> Router {
    Router::new().route("/", post(create_review))
}

pub async fn create_review(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateReviewRequest>,
) -> axum::response::Response {
    match services.reviews.create(body.into()).await {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Reviews for one product; an unknown product yields an empty list, not 404.
pub async fn list_reviews_for_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
) -> axum::response::Response {
    match services.reviews.list_by_product(&ProductId::new(product_id)).await {
        Ok(reviews) => (StatusCode::OK, Json(dto::Items::from(reviews))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
