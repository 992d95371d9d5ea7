//! Wall-clock capability and the [`Platform`] bundle handed to services.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::id::{EntityId, IdGenerator, UuidV7Ids};

/// Platform capability: current time.
pub trait Clock: Send + Sync + core::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests. Starts at the given instant and only moves when
/// told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.current() = at;
    }

    pub fn advance(&self, by: Duration) {
        *self.current() += by;
    }

    // A panic while holding the lock cannot leave a half-written instant.
    fn current(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current()
    }
}

/// The opaque capabilities the services receive from their host: a clock and
/// an id generator.
#[derive(Debug, Clone)]
pub struct Platform {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Platform {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock + UUIDv7 ids.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidV7Ids))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn new_id(&self) -> EntityId {
        self.ids.new_id()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::system()
    }
}
