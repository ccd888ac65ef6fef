#![forbid(unsafe_code)]

//! Monotonic clocks and frame deltas.
//!
//! Overlays never own OS timers. The host measures elapsed time with a
//! [`Clock`] and feeds deltas into `tick`. Tests use [`DeterministicClock`]
//! and advance it explicitly; applications use [`SystemClock`], which is
//! backed by `web-time` so it also works on `wasm32-unknown-unknown`.

use core::time::Duration;

use web_time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Wall-clock backed monotonic clock.
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
    /// Create a clock whose origin is now.
    #[must_use]
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

/// Turns a [`Clock`] into per-frame deltas.
#[derive(Debug, Clone)]
pub struct FrameTimer<C> {
    clock: C,
    last: Duration,
}

impl<C: Clock> FrameTimer<C> {
    /// Start measuring from the clock's current time.
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self { clock, last }
    }

    /// Time elapsed since the previous call (or construction).
    ///
    /// A clock that moved backwards yields a zero delta.
    pub fn delta(&mut self) -> Duration {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last);
        self.last = now.max(self.last);
        dt
    }

    /// The underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the underlying clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
