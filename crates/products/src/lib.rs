//! Products domain module: the catalog.
//!
//! `product` holds the entity and its create/patch inputs; `catalog` is the
//! CRUD service over a product record store.

pub mod catalog;
pub mod product;

pub use catalog::CatalogService;
pub use product::{NewProduct, Product, ProductId, ProductPatch};
