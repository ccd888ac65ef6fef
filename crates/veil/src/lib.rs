#![forbid(unsafe_code)]

//! veil public facade crate.
//!
//! Re-exports the document model, events and clocks from `veil-core` and
//! the overlay stack and widgets from `veil-widgets`, plus a prelude for
//! day-to-day usage.

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use veil_core::clock::{Clock, DeterministicClock, FrameTimer, SystemClock};
pub use veil_core::event::{
    Event, FocusEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, PointerEvent,
    PointerEventKind,
};
pub use veil_core::listener::{ListenerId, ListenerKind, ListenerRegistry, ListenerScope};
pub use veil_core::{Document, DomError, ElementId, keys};

#[cfg(feature = "tracing-json")]
pub use veil_core::logging::json_subscriber;

// --- Widget re-exports -----------------------------------------------------

pub use veil_widgets::overlay::{
    DEFAULT_TRANSITION_DURATION, DismissController, Dismissal, FocusTrap, PortalHandle,
    PortalTarget, TRANSITION_ATTR, TransitionController,
};
pub use veil_widgets::{
    Button, Child, CloseReason, DismissFlags, Drawer, DrawerPosition, DrawerProps, DrawerSize, El,
    EventResult, Heading, Icon, IconSize, Overlay, OverlayConfig, OverlayError, TransitionPhase,
    Widget, child, classes,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Degradation, Error, Result};

/// Prelude for day-to-day usage.
pub mod prelude {
    pub use crate::{
        CloseReason, Document, Drawer, DrawerPosition, DrawerProps, DrawerSize, ElementId, Error,
        Event, EventResult, Overlay, OverlayConfig, Result, TransitionPhase, Widget, child,
    };
}
