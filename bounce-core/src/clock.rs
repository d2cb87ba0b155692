//! Wall-clock sampling
//!
//! The simulation step is whatever wall-clock time passed between the ends of
//! the two previous ticks, so the animation keeps pace with real time no
//! matter how long each render takes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A monotonic time source, read as an offset from an arbitrary origin
pub trait TimeSource {
    fn now(&mut self) -> Duration;
}

/// `std::time::Instant`-backed time source
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Scripted time source for deterministic runs.
///
/// Returns the queued readings first, then keeps advancing by a fixed step.
#[derive(Debug, Clone)]
pub struct ManualClock {
    readings: VecDeque<Duration>,
    last: Duration,
    step: Duration,
}

impl ManualClock {
    /// Clock that reads 0, step, 2*step, ...
    pub fn stepping(step: Duration) -> Self {
        Self {
            readings: VecDeque::from([Duration::ZERO]),
            last: Duration::ZERO,
            step,
        }
    }

    /// Clock that replays `readings`, then advances by `step`.
    /// Readings earlier than the previous one are clamped so time never runs backwards.
    pub fn with_readings(readings: impl IntoIterator<Item = Duration>, step: Duration) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            last: Duration::ZERO,
            step,
        }
    }
}

impl TimeSource for ManualClock {
    fn now(&mut self) -> Duration {
        let next = match self.readings.pop_front() {
            Some(reading) => reading.max(self.last),
            None => self.last + self.step,
        };
        self.last = next;
        next
    }
}

/// Timing of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    pub previous_tick: Duration,
    pub current_tick: Duration,
    pub elapsed_since_start: Duration,
}

impl ClockSample {
    pub fn dt(&self) -> Duration {
        self.current_tick.saturating_sub(self.previous_tick)
    }

    pub fn dt_secs(&self) -> f64 {
        self.dt().as_secs_f64()
    }
}

/// Derives per-tick `dt` and total elapsed time from a time source
#[derive(Debug)]
pub struct ClockSampler<S> {
    source: S,
    start: Duration,
    previous: Duration,
    current: Duration,
}

impl<S: TimeSource> ClockSampler<S> {
    /// Take the starting reading. The first sample has `dt == 0`.
    pub fn start(mut source: S) -> Self {
        let now = source.now();
        Self {
            source,
            start: now,
            previous: now,
            current: now,
        }
    }

    pub fn sample(&self) -> ClockSample {
        ClockSample {
            previous_tick: self.previous,
            current_tick: self.current,
            elapsed_since_start: self.elapsed(),
        }
    }

    /// Mark the end of the current tick and read the clock for the next one
    pub fn end_tick(&mut self) {
        self.previous = self.current;
        self.current = self.source.now();
    }

    /// Time between the start reading and the end of the last completed tick
    pub fn elapsed(&self) -> Duration {
        self.previous.saturating_sub(self.start)
    }
}
