#![forbid(unsafe_code)]

//! Core: document model, input events, listeners, and clocks.
//!
//! # Role in veil
//! `veil-core` is the host layer. It models the document that overlays
//! render into, the input events a host dispatches, and the time source
//! that drives transitions. It knows nothing about overlays or drawers;
//! those live in `veil-widgets`.
//!
//! # Primary responsibilities
//! - **Document**: generational element arena with class lists,
//!   attributes, tab order and the focused element.
//! - **Event**: canonical key/pointer/focus events addressed to a target.
//! - **ListenerRegistry**: explicit attach/detach bookkeeping so components
//!   can prove they hold no listeners after unmount.
//! - **Clock**: deterministic and system monotonic clocks.

pub mod clock;
pub mod dom;
pub mod error;
pub mod event;
pub mod keys;
pub mod listener;
pub mod logging;

pub use dom::{Document, ElementId};
pub use error::DomError;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
