//! Identifiers and the id-generation capability.

use core::str::FromStr;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque string identifier of a stored entity.
///
/// Ids are produced by an [`IdGenerator`] and used verbatim as record-store
/// keys. Nothing about their format is assumed past "non-empty string".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for EntityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Adds the standard conversions to a domain id newtype wrapping [`EntityId`].
///
/// The newtype must be a single-field tuple struct: `pub struct ProductId(pub EntityId);`
#[macro_export]
macro_rules! impl_entity_id {
    ($t:ident) => {
        impl $t {
            pub fn new(id: impl Into<$crate::EntityId>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$crate::EntityId> for $t {
            fn from(value: $crate::EntityId) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self($crate::EntityId::from(value))
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self($crate::EntityId::from(value))
            }
        }
    };
}

/// Platform capability: hands out globally unique identifiers.
pub trait IdGenerator: Send + Sync + core::fmt::Debug {
    fn new_id(&self) -> EntityId;
}

/// Production generator: UUIDv7 (time-ordered), rendered hyphenated.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn new_id(&self) -> EntityId {
        EntityId(Uuid::now_v7().to_string())
    }
}

/// Deterministic generator for tests: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> EntityId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EntityId(format!("{}-{}", self.prefix, n))
    }
}
