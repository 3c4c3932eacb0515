//! Clock sources and the timestamps they produce.
//!
//! A [`Timestamp`] is a nanosecond count since the origin of the clock that
//! produced it. Only compare timestamps that came from the same clock.
use serde_derive::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Process-wide zero of [`MonotonicClock`]; set on first read, never rewritten.
static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Anything that can report the current instant.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Point in time as nanoseconds since the owning clock's origin.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Time between `earlier` and `self`, zero if `earlier` is actually later.
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }

    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

/// The system monotonic clock, read through `std::time::Instant`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    /// Pins the process origin now instead of on the first read.
    pub fn init() {
        ORIGIN.get_or_init(Instant::now);
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Timestamp {
        let origin = ORIGIN.get_or_init(Instant::now);
        // u64 nanoseconds last ~584 years past the origin
        let nanos = u64::try_from(origin.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Timestamp(nanos)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and give the
/// other to an [`ElapsedTimer`](crate::ElapsedTimer).
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    nanos: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            nanos: Rc::new(Cell::new(start.as_nanos())),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.nanos.set(at.as_nanos());
    }

    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.set(self.nanos.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.nanos.get())
    }
}
