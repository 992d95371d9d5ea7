//! Infrastructure layer: record store backends and process configuration.

pub mod config;
pub mod record_store;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use record_store::{InMemoryRecordStore, PostgresRecordStore};
