//! Property-based invariant tests for the open/close lifecycle.
//!
//! 1. Every reported phase is a legal successor of the one before it
//! 2. `progress()` stays within `[0, 1]`
//! 3. A closed request always reaches `Closed` after two durations
//! 4. Overlay nodes exist iff the phase is not `Closed`
//! 5. Listeners exist iff nodes exist
//! 6. Callbacks fire exactly once per phase entry, in entry order

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use veil_core::Document;
use veil_widgets::overlay::{Overlay, OverlayConfig, TransitionController, TransitionPhase};
use veil_widgets::{El, child};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Request(bool),
    Tick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => any::<bool>().prop_map(Op::Request),
        3 => (0u64..400).prop_map(Op::Tick),
    ]
}

fn duration_strategy() -> impl Strategy<Value = Duration> {
    prop_oneof![
        1 => Just(Duration::ZERO),
        3 => (1u64..500).prop_map(Duration::from_millis),
    ]
}

// ── Controller ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn controller_only_takes_legal_steps(
        duration in duration_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..64),
    ) {
        let mut controller = TransitionController::new(duration);
        let mut previous = controller.phase();
        for op in ops {
            let entered = match op {
                Op::Request(open) => controller.request(open, duration),
                Op::Tick(ms) => controller.tick(Duration::from_millis(ms)),
            };
            for phase in entered {
                prop_assert!(previous.can_enter(phase), "{previous:?} -> {phase:?}");
                previous = phase;
            }
            prop_assert_eq!(previous, controller.phase());
            let progress = controller.progress();
            prop_assert!((0.0..=1.0).contains(&progress));
        }

        controller.request(false, duration);
        controller.tick(duration);
        controller.tick(duration);
        prop_assert_eq!(controller.phase(), TransitionPhase::Closed);
    }

    #[test]
    fn open_request_from_closed_enters_opening_immediately(
        duration in duration_strategy(),
    ) {
        let mut controller = TransitionController::new(duration);
        let entered = controller.request(true, duration);
        prop_assert_eq!(entered.first().copied(), Some(TransitionPhase::Opening));
    }
}

// ── Overlay ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn overlay_mount_and_callbacks_track_phase(
        duration in duration_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..48),
    ) {
        let mut doc = Document::new();
        let body = doc.body();
        let log: Rc<RefCell<Vec<TransitionPhase>>> = Rc::default();
        let config = |open: bool| {
            let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
            OverlayConfig::new()
                .is_open(open)
                .transition_duration(duration)
                .on_opening(move |_| a.borrow_mut().push(TransitionPhase::Opening))
                .on_opened(move |_| b.borrow_mut().push(TransitionPhase::Open))
                .on_closing(move |_| c.borrow_mut().push(TransitionPhase::Closing))
                .on_closed(move |_| d.borrow_mut().push(TransitionPhase::Closed))
        };
        let content = [child(El::div().child(El::new("button").text("ok")))];
        let mut overlay = Overlay::new();
        let mut shadow = TransitionController::new(duration);

        for op in ops {
            let expected = match op {
                Op::Request(open) => {
                    overlay.render(&mut doc, body, config(open), &content);
                    shadow.request(open, duration)
                }
                Op::Tick(ms) => {
                    let dt = Duration::from_millis(ms);
                    overlay.tick(&mut doc, dt);
                    shadow.tick(dt)
                }
            };
            let fired: Vec<TransitionPhase> = log.borrow_mut().drain(..).collect();
            prop_assert_eq!(fired, expected);
            prop_assert_eq!(overlay.phase(), shadow.phase());

            let mounted = overlay.phase() != TransitionPhase::Closed;
            prop_assert_eq!(overlay.is_mounted(), mounted);
            prop_assert_eq!(doc.len() > 1, mounted);
            prop_assert_eq!(!doc.listeners().is_empty(), mounted);
        }
        prop_assert!(overlay.diagnostics().is_empty());
    }
}
