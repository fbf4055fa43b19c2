//! Frame pacing and delta-time.
//!
//! The [`FrameClock`] paces the session to a fixed frame budget. Each
//! [`tick`](FrameClock::tick):
//!
//! 1. sleeps for whatever is left of the budget since the previous frame;
//! 2. measures the real time elapsed since the previous frame;
//! 3. clamps that measurement to the configured ceiling and hands it out as
//!    the frame's delta-time.
//!
//! The clamp keeps one stalled frame (a debugger pause, a slow level load)
//! from turning into a single huge simulation step.
//!
//! Time comes from a [`Clock`]. [`SystemClock`] reads the wall clock;
//! [`ManualClock`] only moves when told to, which makes frame timing
//! deterministic in tests.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use skirmish_engine::tick::{Clock, FrameClock, ManualClock};
//!
//! let mut clock = ManualClock::new();
//! let handle = clock.clone();
//! let mut frames = FrameClock::new(Duration::from_millis(16), 0.05);
//! frames.reset(clock.now());
//!
//! // A 500 ms stall is clamped to the 50 ms ceiling.
//! handle.advance(Duration::from_millis(500));
//! let time = frames.tick(&mut clock);
//! assert_eq!(time.delta_secs, 0.05);
//! assert_eq!(time.measured, Duration::from_millis(500));
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic time source measured from the clock's own start.
pub trait Clock {
    /// Time since the clock started.
    fn now(&self) -> Duration;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time via [`Instant`]; sleeps with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
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
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven clock.
///
/// Clones share the same time, so a test can keep a handle and
/// [`advance`](Self::advance) it while the game owns the clock. Sleeping
/// advances time by exactly the requested amount.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

// ---------------------------------------------------------------------------
// FrameTime
// ---------------------------------------------------------------------------

/// Timing of one frame as seen by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds to advance the simulation by; never above the ceiling.
    pub delta_secs: f32,
    /// Unclamped time since the previous frame.
    pub measured: Duration,
    /// Time spent sleeping to fill the budget.
    pub slept: Duration,
    /// Milliseconds since the clock was reset; drives animation.
    pub elapsed_ms: u64,
}

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Fixed-budget frame pacer with a clamped delta-time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    budget: Duration,
    max_delta_secs: f32,
    /// Clock reading at reset.
    origin: Duration,
    /// Clock reading at the end of the previous tick.
    last: Duration,
    frames: u64,
}

impl FrameClock {
    /// # Panics
    ///
    /// Panics if `max_delta_secs` is not positive and finite. Use
    /// [`EngineConfig::validate`] to reject such values up front.
    pub fn new(budget: Duration, max_delta_secs: f32) -> Self {
        assert!(
            max_delta_secs > 0.0 && max_delta_secs.is_finite(),
            "max_delta_secs must be positive and finite, got {max_delta_secs}"
        );
        Self {
            budget,
            max_delta_secs,
            origin: Duration::ZERO,
            last: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.frame_budget(), config.max_delta_secs)
    }

    /// Start measuring from `now`. Call when the session (re)starts so that
    /// setup time is not billed to the first frame.
    pub fn reset(&mut self, now: Duration) {
        self.origin = now;
        self.last = now;
        self.frames = 0;
    }

    /// Wait out the rest of the budget and time the frame.
    pub fn tick<C: Clock + ?Sized>(&mut self, clock: &mut C) -> FrameTime {
        let since_last = clock.now().saturating_sub(self.last);
        let mut slept = Duration::ZERO;
        if since_last < self.budget {
            slept = self.budget - since_last;
            clock.sleep(slept);
        }

        let now = clock.now();
        let measured = now.saturating_sub(self.last);
        self.last = now;
        self.frames += 1;

        let raw = measured.as_secs_f32();
        let delta_secs = raw.min(self.max_delta_secs);
        if raw > self.max_delta_secs {
            warn!(
                frame = self.frames,
                measured_ms = measured.as_millis() as u64,
                clamped_to = self.max_delta_secs,
                "frame over budget; delta clamped"
            );
        } else {
            trace!(frame = self.frames, delta_secs, "frame");
        }

        FrameTime {
            delta_secs,
            measured,
            slept,
            elapsed_ms: now.saturating_sub(self.origin).as_millis() as u64,
        }
    }

    /// Frames ticked since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn max_delta_secs(&self) -> f32 {
        self.max_delta_secs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
