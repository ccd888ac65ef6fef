#![forbid(unsafe_code)]

//! Open/close transition state machine.
//!
//! The controller tracks which phase an overlay is in and when the current
//! timed phase ends. It performs no side effects: every call returns the
//! ordered list of phases entered, and the caller fires callbacks and
//! mounts/unmounts content accordingly.
//!
//! # State machine
//!
//! ```text
//! Closed --open--> Opening --timer--> Open --close--> Closing --timer--> Closed
//!                     ^                                  |
//!                     +--------------open----------------+
//! ```
//!
//! A close request during `Opening` does not cancel the timer. The phase
//! still settles to `Open` when the timer elapses and only then moves on to
//! `Closing`, so `Opening` is entered exactly once per cycle however fast
//! the caller toggles. An open request during `Closing` restarts at
//! `Opening` immediately; the content never unmounts in between.
//!
//! # Invariants
//!
//! - Each returned phase is a legal successor of the previous one.
//! - Phases are a pure function of (phase, requested open, elapsed time).
//! - Time in excess of a timer carries into the next timed phase.
//! - A zero duration collapses a whole transition into one call, with the
//!   same ordering as a timed one.

use std::time::Duration;

/// Default transition duration.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Current phase of the overlay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    /// Nothing is mounted.
    #[default]
    Closed,
    /// Content is mounted and animating in.
    Opening,
    /// Content is mounted and settled.
    Open,
    /// Content is mounted and animating out.
    Closing,
}

impl TransitionPhase {
    /// Whether content is mounted in this phase.
    #[inline]
    pub fn is_mounted(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a timer is running in this phase.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Lower-case name, used for the `data-transition` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }

    /// Whether `next` may directly follow `self`.
    pub fn can_enter(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Closed, Self::Opening)
                | (Self::Opening, Self::Open)
                | (Self::Open, Self::Closing)
                | (Self::Closing, Self::Closed)
                | (Self::Closing, Self::Opening)
        )
    }
}

/// Drives [`TransitionPhase`] from open requests and elapsed time.
#[derive(Debug, Clone)]
pub struct TransitionController {
    phase: TransitionPhase,
    requested_open: bool,
    elapsed: Duration,
    duration: Duration,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DURATION)
    }
}

impl TransitionController {
    /// Create a closed controller with the given transition duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: TransitionPhase::Closed,
            requested_open: false,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Last requested open state.
    pub fn requested_open(&self) -> bool {
        self.requested_open
    }

    /// Transition duration used for timed phases.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fraction of the current timed phase that has elapsed, in `[0, 1]`.
    ///
    /// `Open` reports 1 and `Closed` reports 0.
    pub fn progress(&self) -> f64 {
        match self.phase {
            TransitionPhase::Open => 1.0,
            TransitionPhase::Closed => 0.0,
            TransitionPhase::Opening | TransitionPhase::Closing => {
                if self.duration.is_zero() {
                    1.0
                } else {
                    (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// Request the overlay open or closed.
    ///
    /// `duration` applies to the current and future timed phases. Returns
    /// the phases entered, in order.
    pub fn request(&mut self, open: bool, duration: Duration) -> Vec<TransitionPhase> {
        self.requested_open = open;
        self.duration = duration;
        if !self.phase.is_animating() {
            // Overshoot only carries within a single tick.
            self.elapsed = Duration::ZERO;
        }
        let mut entered = Vec::new();
        self.settle(&mut entered);
        entered
    }

    /// Advance time by `dt`. Returns the phases entered, in order.
    pub fn tick(&mut self, dt: Duration) -> Vec<TransitionPhase> {
        let mut entered = Vec::new();
        if self.phase.is_animating() {
            self.elapsed = self.elapsed.saturating_add(dt);
            self.settle(&mut entered);
        }
        entered
    }

    /// Time left before the current timed phase ends.
    pub fn remaining(&self) -> Option<Duration> {
        self.phase
            .is_animating()
            .then(|| self.duration.saturating_sub(self.elapsed))
    }

    /// Jump straight to `Closed` without reporting transitions.
    pub fn reset(&mut self) {
        self.phase = TransitionPhase::Closed;
        self.requested_open = false;
        self.elapsed = Duration::ZERO;
    }

    fn timer_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Apply transition rules until the phase is stable.
    fn settle(&mut self, entered: &mut Vec<TransitionPhase>) {
        loop {
            let (next, carry) = match (self.phase, self.requested_open) {
                (TransitionPhase::Closed, true) => (TransitionPhase::Opening, Duration::ZERO),
                (TransitionPhase::Opening, _) if self.timer_done() => {
                    (TransitionPhase::Open, self.elapsed - self.duration)
                }
                (TransitionPhase::Open, false) => (TransitionPhase::Closing, self.elapsed),
                (TransitionPhase::Closing, true) => (TransitionPhase::Opening, Duration::ZERO),
                (TransitionPhase::Closing, false) if self.timer_done() => {
                    (TransitionPhase::Closed, Duration::ZERO)
                }
                _ => break,
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(
                message = "overlay.transition.step",
                from = self.phase.as_str(),
                to = next.as_str(),
                carry_us = carry.as_micros() as u64
            );

            debug_assert!(self.phase.can_enter(next));
            self.phase = next;
            self.elapsed = carry;
            entered.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransitionPhase::{Closed, Closing, Open, Opening};

    const MS_100: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // -------------------------------------------------------------------------
    // Phase helpers
    // -------------------------------------------------------------------------

    #[test]
    fn mounted_phases() {
        assert!(!Closed.is_mounted());
        assert!(Opening.is_mounted());
        assert!(Open.is_mounted());
        assert!(Closing.is_mounted());
    }

    #[test]
    fn animating_phases() {
        assert!(!Closed.is_animating());
        assert!(Opening.is_animating());
        assert!(!Open.is_animating());
        assert!(Closing.is_animating());
    }

    #[test]
    fn legal_edges() {
        assert!(Closed.can_enter(Opening));
        assert!(Closing.can_enter(Opening));
        assert!(!Closed.can_enter(Open));
        assert!(!Opening.can_enter(Closing));
        assert!(!Open.can_enter(Opening));
    }

    // -------------------------------------------------------------------------
    // Full cycle
    // -------------------------------------------------------------------------

    #[test]
    fn open_enters_opening_synchronously() {
        let mut t = TransitionController::new(MS_100);
        assert_eq!(t.request(true, MS_100), vec![Opening]);
        assert_eq!(t.phase(), Opening);
    }

    #[test]
    fn full_cycle_order() {
        let mut t = TransitionController::new(MS_100);
        let mut all = t.request(true, MS_100);
        all.extend(t.tick(ms(50)));
        all.extend(t.tick(ms(50)));
        all.extend(t.request(false, MS_100));
        all.extend(t.tick(ms(100)));
        assert_eq!(all, vec![Opening, Open, Closing, Closed]);
    }

    #[test]
    fn tick_before_timer_keeps_phase() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        assert!(t.tick(ms(99)).is_empty());
        assert_eq!(t.phase(), Opening);
        assert_eq!(t.remaining(), Some(ms(1)));
    }

    #[test]
    fn repeated_open_requests_are_noops() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        assert!(t.request(true, MS_100).is_empty());
        t.tick(MS_100);
        assert!(t.request(true, MS_100).is_empty());
        assert_eq!(t.phase(), Open);
    }

    #[test]
    fn close_from_closed_is_noop() {
        let mut t = TransitionController::new(MS_100);
        assert!(t.request(false, MS_100).is_empty());
        assert!(t.tick(ms(500)).is_empty());
        assert_eq!(t.phase(), Closed);
    }

    // -------------------------------------------------------------------------
    // Rapid toggling
    // -------------------------------------------------------------------------

    #[test]
    fn close_during_opening_settles_to_open_first() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        assert!(t.request(false, MS_100).is_empty());
        assert_eq!(t.phase(), Opening);
        assert_eq!(t.tick(MS_100), vec![Open, Closing]);
        assert_eq!(t.tick(MS_100), vec![Closed]);
    }

    #[test]
    fn toggle_during_opening_does_not_refire_opening() {
        let mut t = TransitionController::new(MS_100);
        let mut all = t.request(true, MS_100);
        all.extend(t.request(false, MS_100));
        all.extend(t.request(true, MS_100));
        all.extend(t.request(false, MS_100));
        all.extend(t.request(true, MS_100));
        all.extend(t.tick(MS_100));
        assert_eq!(all, vec![Opening, Open]);
    }

    #[test]
    fn open_during_closing_restarts_at_opening() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        t.tick(MS_100);
        t.request(false, MS_100);
        t.tick(ms(40));
        assert_eq!(t.request(true, MS_100), vec![Opening]);
        assert_eq!(t.progress(), 0.0);
        assert_eq!(t.tick(MS_100), vec![Open]);
    }

    #[test]
    fn overshoot_carries_into_closing() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        t.request(false, MS_100);
        // 100ms to settle Open, 100ms more to finish Closing.
        assert_eq!(t.tick(ms(250)), vec![Open, Closing, Closed]);
    }

    #[test]
    fn overshoot_partially_consumes_closing() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        t.request(false, MS_100);
        assert_eq!(t.tick(ms(160)), vec![Open, Closing]);
        assert_eq!(t.remaining(), Some(ms(40)));
    }

    // -------------------------------------------------------------------------
    // Zero duration
    // -------------------------------------------------------------------------

    #[test]
    fn zero_duration_collapses_with_order() {
        let mut t = TransitionController::new(Duration::ZERO);
        assert_eq!(t.request(true, Duration::ZERO), vec![Opening, Open]);
        assert_eq!(t.request(false, Duration::ZERO), vec![Closing, Closed]);
    }

    // -------------------------------------------------------------------------
    // Progress
    // -------------------------------------------------------------------------

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut t = TransitionController::new(MS_100);
        assert_eq!(t.progress(), 0.0);
        t.request(true, MS_100);
        t.tick(ms(25));
        assert!((t.progress() - 0.25).abs() < 1e-9);
        t.tick(ms(75));
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn stale_overshoot_does_not_shorten_later_close() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        assert_eq!(t.tick(ms(150)), vec![Open]);
        t.request(false, MS_100);
        assert_eq!(t.remaining(), Some(MS_100));
    }

    #[test]
    fn reset_returns_to_closed_silently() {
        let mut t = TransitionController::new(MS_100);
        t.request(true, MS_100);
        t.reset();
        assert_eq!(t.phase(), Closed);
        assert!(!t.requested_open());
        assert!(t.tick(MS_100).is_empty());
    }
}
