//! Domain error model.

use thiserror::Error;

use crate::store::StoreError;

/// Result type used across the service layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `NotFound` is the only failure the catalog, ledger and review board raise
/// on their own. `Storage` carries failures of the underlying record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested id is absent from its collection.
    #[error("{0}")]
    NotFound(String),

    /// The record store failed to serve the request.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    /// Build a descriptive not-found error, e.g. `product p-1 not found`.
    pub fn not_found(kind: &str, id: impl core::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id} not found"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
