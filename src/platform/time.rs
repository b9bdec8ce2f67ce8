//! Monotonic time and frame pacing

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Source of monotonic time
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Caps the loop at a fixed frame rate and reports delta time
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    last: Duration,
    /// Largest delta handed out, so a stall does not teleport entities
    max_dt: Duration,
}

impl FramePacer {
    pub fn new(fps: u32, now: Duration) -> Self {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            frame,
            last: now,
            max_dt: Duration::from_millis(100),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left in the current frame slot
    pub fn remaining(&self, now: Duration) -> Duration {
        (self.last + self.frame).saturating_sub(now)
    }

    /// Close the current frame at `now`, returning its delta in seconds.
    pub fn finish_frame(&mut self, now: Duration) -> f32 {
        let dt = now.saturating_sub(self.last).min(self.max_dt);
        self.last = now;
        dt.as_secs_f32()
    }

    /// Sleep out the rest of the frame slot, then close it.
    pub fn wait<C: Clock>(&mut self, clock: &C) -> f32 {
        let remaining = self.remaining(clock.now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.finish_frame(clock.now())
    }
}
