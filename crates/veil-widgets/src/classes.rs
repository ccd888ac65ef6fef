#![forbid(unsafe_code)]

//! Stable class names applied by the widgets.
//!
//! Hosts and tests locate structural elements through these names, so they
//! are part of the public contract and never change between renders.

pub const NS: &str = "veil";

pub const PORTAL: &str = "veil-portal";

pub const OVERLAY: &str = "veil-overlay";
pub const OVERLAY_OPEN: &str = "veil-overlay-open";
pub const OVERLAY_INLINE: &str = "veil-overlay-inline";
pub const OVERLAY_BACKDROP: &str = "veil-overlay-backdrop";
pub const OVERLAY_CONTENT: &str = "veil-overlay-content";
pub const OVERLAY_CONTAINER: &str = "veil-overlay-container";

pub const DRAWER: &str = "veil-drawer";
pub const DRAWER_HEADER: &str = "veil-drawer-header";
pub const DRAWER_BODY: &str = "veil-drawer-body";
pub const DRAWER_FOOTER: &str = "veil-drawer-footer";
pub const DRAWER_FOOTER_ACTIONS: &str = "veil-drawer-footer-actions";
pub const DRAWER_CLOSE: &str = "veil-drawer-close";

pub const BUTTON: &str = "veil-button";
pub const MINIMAL: &str = "veil-minimal";
pub const ICON: &str = "veil-icon";
pub const HEADING: &str = "veil-heading";

pub const INTENT_PRIMARY: &str = "veil-intent-primary";
pub const INTENT_SUCCESS: &str = "veil-intent-success";
pub const INTENT_WARNING: &str = "veil-intent-warning";
pub const INTENT_DANGER: &str = "veil-intent-danger";

/// Class for an icon glyph, e.g. `veil-icon-inbox`.
#[must_use]
pub fn icon_class(name: &str) -> String {
    format!("{ICON}-{name}")
}

/// Class for a drawer anchored to `edge`, e.g. `veil-drawer-position-right`.
#[must_use]
pub fn drawer_position_class(edge: &str) -> String {
    format!("{DRAWER}-position-{edge}")
}
