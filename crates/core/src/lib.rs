//! `bazaar-core` — shared building blocks for the marketplace store.
//!
//! This crate holds the entity contracts, the error model and the external
//! capabilities (clock, id generation, record storage) that the catalog,
//! order and review services are built on. It contains no storage backend.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod store;

pub use clock::{Clock, ManualClock, Platform, SystemClock};
pub use entity::{Entity, Record};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, IdGenerator, SequentialIds, UuidV7Ids};
pub use store::{RecordStore, StoreError};
