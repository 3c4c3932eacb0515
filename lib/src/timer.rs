use crate::clock::{Clock, MonotonicClock, Timestamp};
use crate::precision::{convert_duration, Precision};
use crate::util::Elapsed;
use crate::TimerConfig;
use log::trace;
use std::time::Duration;

/// Stopwatch measuring time since a start instant.
///
/// Reads taking `tare = true` return the interval up to the read, then move
/// the start to the current clock reading. A timer is not synchronised;
/// share it across threads behind your own lock.
#[derive(Debug, Clone)]
pub struct ElapsedTimer<C: Clock = MonotonicClock> {
    clock: C,
    start: Timestamp,
}

impl ElapsedTimer<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }

    pub fn from_timestamp(start: Timestamp) -> Self {
        Self::from_timestamp_with_clock(MonotonicClock, start)
    }
}

impl Default for ElapsedTimer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ElapsedTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        let start = clock.now();
        Self { clock, start }
    }

    /// Starts from `start` verbatim instead of the current reading.
    pub fn from_timestamp_with_clock(clock: C, start: Timestamp) -> Self {
        Self { clock, start }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tare(&mut self) {
        self.start = self.clock.now();
        trace!("timer tared at {} ns", self.start.as_nanos());
    }

    /// Reads the elapsed time through a shared borrow; never tares.
    pub fn peek(&self) -> Duration {
        self.clock.now().duration_since(self.start)
    }

    /// Time since the start instant; zero if the clock reads earlier than it.
    pub fn elapsed_duration(&mut self, tare: bool) -> Duration {
        let now = self.clock.now();
        let elapsed = now.duration_since(self.start);
        if tare {
            self.start = now;
            trace!("timer tared at {} ns", now.as_nanos());
        }
        elapsed
    }

    /// Elapsed nanoseconds, saturating at `u64::MAX`.
    pub fn elapsed(&mut self, tare: bool) -> u64 {
        let elapsed = self.elapsed_duration(tare);
        u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_as(&mut self, precision: Precision, tare: bool) -> f64 {
        convert_duration(self.elapsed_duration(tare), precision)
    }

    pub fn elapsed_with(&mut self, cfg: &TimerConfig) -> f64 {
        self.elapsed_as(cfg.precision, cfg.tare_on_read)
    }

    pub fn elapsed_display(&mut self, tare: bool) -> Elapsed {
        Elapsed(self.elapsed_duration(tare))
    }
}
