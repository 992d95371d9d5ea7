//! Entity traits: identity + persistence contract.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier. Its string form is the store key.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + AsRef<str>;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity that lives in a record-store collection as its full serialized form.
pub trait Record: Entity + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the keyed collection holding this record type.
    const COLLECTION: &'static str;

    /// Record-store key (the entity's own id).
    fn key(&self) -> &str {
        self.id().as_ref()
    }
}
