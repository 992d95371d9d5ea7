//! Record store backends implementing [`bazaar_core::RecordStore`].

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryRecordStore;
pub use postgres::{PostgresRecordStore, connect, ensure_schema};
