use axum::Router;

pub mod orders;
pub mod products;
pub mod reviews;
pub mod system;

/// Router for all catalog/ledger/review endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
}
