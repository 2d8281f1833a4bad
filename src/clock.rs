//! Time sources for stamping signatures.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::types::identifiers::Timestamp;

pub trait Clock: Send + Sync {
    /// Must never return a value lower than a previous call.
    fn now(&self) -> Timestamp;
}

/// Wall clock in microseconds, clamped so it never runs backward.
#[derive(Debug, Default)]
pub struct SystemClock {
    high_water: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Utc::now().timestamp_micros();
        // fetch_max returns the previous value; the result is whichever is larger.
        let previous = self.high_water.fetch_max(wall, Ordering::AcqRel);
        Timestamp::from_micros(previous.max(wall))
    }
}

/// Settable clock for tests and deterministic replay.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            micros: AtomicI64::new(start.as_micros()),
        }
    }

    /// Moving backwards is ignored.
    pub fn set(&self, at: Timestamp) {
        self.micros.fetch_max(at.as_micros(), Ordering::AcqRel);
    }

    /// Negative steps are ignored; saturates at `i64::MAX`.
    pub fn advance(&self, micros: i64) {
        let step = micros.max(0);
        // The closure always returns Some, so this cannot fail.
        let _ = self
            .micros
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| Some(v.saturating_add(step)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.micros.load(Ordering::Acquire))
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
