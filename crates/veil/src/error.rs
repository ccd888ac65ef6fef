#![forbid(unsafe_code)]

//! veil error model and graceful degradation.
//!
//! Overlays never hand errors back through `render`, `tick` or
//! `handle_event`; they absorb them and keep going. This module gives hosts
//! one type to collect those diagnostics under, and tells them what the
//! overlay did instead.
//!
//! # Invariants
//!
//! - Every variant maps to exactly one [`Degradation`].
//! - [`Error::source`](std::error::Error::source) always returns the wrapped
//!   domain error.

use std::fmt;

use veil_core::DomError;
use veil_widgets::OverlayError;

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for veil hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structural document operation failed.
    Dom(DomError),
    /// Overlay diagnostic (absorbed during the lifecycle).
    Overlay(OverlayError),
}

/// Standard result type for veil APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What the overlay did in place of the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// A conflicting setting was ignored; the rest of the config applies.
    IgnoreConfig,
    /// Focus was left where it is instead of being restored.
    SkipFocusRestore,
    /// Content was mounted into the fallback container.
    FallbackContainer,
    /// The document operation was dropped; the tree may be missing nodes.
    DropOperation,
}

impl Error {
    /// Determine the degradation that was applied for this error.
    pub fn degradation(&self) -> Degradation {
        match self {
            Self::Overlay(OverlayError::ConfigurationConflict { .. }) => Degradation::IgnoreConfig,
            Self::Overlay(OverlayError::StaleFocusTarget(_)) => Degradation::SkipFocusRestore,
            Self::Overlay(OverlayError::MissingContainer { .. }) => Degradation::FallbackContainer,
            Self::Overlay(OverlayError::Dom(_)) | Self::Dom(_) => Degradation::DropOperation,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Dom(_) => "dom",
            Self::Overlay(err) => err.kind(),
        }
    }

    /// Whether the rendered result is still complete after degrading.
    ///
    /// A dropped document operation can leave the tree short of nodes; the
    /// host should re-render or unmount.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.degradation(), Degradation::DropOperation)
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dom(err) => write!(f, "{err}"),
            Self::Overlay(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnoreConfig => write!(f, "ignore_config"),
            Self::SkipFocusRestore => write!(f, "skip_focus_restore"),
            Self::FallbackContainer => write!(f, "fallback_container"),
            Self::DropOperation => write!(f, "drop_operation"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            Self::Overlay(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<DomError> for Error {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

impl From<OverlayError> for Error {
    fn from(err: OverlayError) -> Self {
        Self::Overlay(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
