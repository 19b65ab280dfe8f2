//! Time sources
//!
//! The simulation never reads the wall clock directly. The frame driver samples a
//! `Clock` once per frame to get the frame delta, and the simulation keeps its own
//! `ManualClock` timeline that only moves by the (clamped) deltas handed to `tick`.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A point on a clock's timeline, measured from the clock's start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(Duration);

impl Mark {
    /// Mark at a given offset from the clock start
    pub fn from_start(offset: Duration) -> Self {
        Self(offset)
    }

    /// Offset from the clock start
    pub fn offset(&self) -> Duration {
        self.0
    }

    /// Time between `earlier` and this mark (zero if `earlier` is later)
    pub fn duration_since(&self, earlier: Mark) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Monotonic time source
pub trait Clock {
    /// Current position on the timeline
    fn now(&self) -> Mark;

    /// Time elapsed since `mark`
    fn elapsed_since(&self, mark: Mark) -> Duration {
        self.now().duration_since(mark)
    }
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Mark {
        Mark(self.start.elapsed())
    }
}

/// Clock that only moves when told to. Used as the simulation timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Mark {
        Mark(self.now)
    }
}

/// Clock that moves forward by a fixed step every time it is sampled.
///
/// Gives headless runs and tests a steady frame rate without sleeping.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    now: Cell<Duration>,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            now: Cell::new(Duration::ZERO),
        }
    }

    /// Frame rate helper, e.g. `FixedStepClock::per_second(60)`
    pub fn per_second(frames: u32) -> Self {
        Self::new(Duration::from_secs(1) / frames.max(1))
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn now(&self) -> Mark {
        let next = self.now.get() + self.step;
        self.now.set(next);
        Mark(next)
    }
}
