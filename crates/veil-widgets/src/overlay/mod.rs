#![forbid(unsafe_code)]

//! Overlay lifecycle primitive.
//!
//! An [`Overlay`] mounts arbitrary content into a portal (or inline),
//! sequences the open/close transition, traps focus while mounted and turns
//! Escape or an outside click into an `on_close` request. It is built from
//! four parts that can also be used on their own:
//!
//! - [`TransitionController`]: the `Closed/Opening/Open/Closing` machine.
//! - [`PortalTarget`]: creates and removes the off-tree root.
//! - [`FocusTrap`]: memento, auto-focus, containment, restoration.
//! - [`DismissController`]: escape and outside-click listeners.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use veil_core::Document;
//! use veil_widgets::overlay::{Overlay, OverlayConfig, TransitionPhase};
//! use veil_widgets::{El, child};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let mut overlay = Overlay::new();
//! let content = [child(El::div().text("Hello"))];
//!
//! overlay.render(&mut doc, body, OverlayConfig::new().is_open(true), &content);
//! assert_eq!(overlay.phase(), TransitionPhase::Opening);
//! overlay.tick(&mut doc, Duration::from_millis(300));
//! assert_eq!(overlay.phase(), TransitionPhase::Open);
//! ```

mod config;
mod container;
mod dismiss;
mod error;
mod focus_trap;
mod portal;
mod transition;

pub use config::{CloseCallback, CloseReason, LifecycleCallback, OverlayConfig};
pub use container::{Overlay, TRANSITION_ATTR};
pub use dismiss::{DismissController, DismissFlags, Dismissal};
pub use error::OverlayError;
pub use focus_trap::{AUTOFOCUS_ATTR, FocusTrap};
pub use portal::{PortalHandle, PortalTarget};
pub use transition::{DEFAULT_TRANSITION_DURATION, TransitionController, TransitionPhase};
