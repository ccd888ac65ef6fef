#![forbid(unsafe_code)]

//! Absorbed overlay errors.
//!
//! None of these reach the caller as a `Result`. The overlay degrades
//! gracefully, records the error in its diagnostics list and logs it.

use std::fmt;

use veil_core::{DomError, ElementId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Contradictory flags; the named setting was ignored.
    ConfigurationConflict { ignored: &'static str },
    /// The element focused before opening left the document; focus was not
    /// restored.
    StaleFocusTarget(ElementId),
    /// The requested portal container or inline host is not attached;
    /// content was mounted into `fallback` instead.
    MissingContainer {
        requested: ElementId,
        fallback: ElementId,
    },
    /// A document operation failed and was dropped.
    Dom(DomError),
}

impl OverlayError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationConflict { .. } => "configuration",
            Self::StaleFocusTarget(_) => "stale_focus_target",
            Self::MissingContainer { .. } => "missing_container",
            Self::Dom(_) => "dom",
        }
    }
}

impl From<DomError> for OverlayError {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationConflict { ignored } => {
                write!(f, "conflicting overlay configuration: {ignored} ignored")
            }
            Self::StaleFocusTarget(id) => write!(
                f,
                "focus target {} left the document; focus not restored",
                id.index()
            ),
            Self::MissingContainer {
                requested,
                fallback,
            } => write!(
                f,
                "container {} is not attached; using {}",
                requested.index(),
                fallback.index()
            ),
            Self::Dom(err) => write!(f, "document: {err}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            _ => None,
        }
    }
}
