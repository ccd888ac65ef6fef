#![forbid(unsafe_code)]

//! Focus containment for a mounted overlay.
//!
//! # Invariants
//!
//! 1. **Memento**: the element focused before the overlay opened is
//!    captured once per open/close cycle, and only when auto-focus is on.
//! 2. **Auto-focus**: on mount focus moves to the first `[autofocus]`
//!    descendant, else the first element in tab order, else the container.
//! 3. **Containment**: while enforcing, focus landing outside the container
//!    is pulled back in, and Tab/Shift+Tab cycle the container's tab order.
//! 4. **Restoration**: on unmount focus returns to the memento and the
//!    memento is cleared.
//!
//! # Failure Modes
//!
//! - A memento that left the document is dropped and reported as
//!   [`OverlayError::StaleFocusTarget`]; focus stays where it is.
//! - A container with no focusable descendants takes focus itself (it is
//!   given tab index -1 on mount).

use veil_core::event::{Event, KeyCode, KeyEventKind};
use veil_core::listener::{ListenerId, ListenerKind, ListenerScope};
use veil_core::{Document, DomError, ElementId};

use super::error::OverlayError;

/// Attribute marking the preferred initial focus target.
pub const AUTOFOCUS_ATTR: &str = "autofocus";

#[derive(Debug, Clone, Default)]
pub struct FocusTrap {
    container: Option<ElementId>,
    memento: Option<ElementId>,
    focus_listener: Option<ListenerId>,
    tab_listener: Option<ListenerId>,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The element focus will return to on unmount.
    pub fn memento(&self) -> Option<ElementId> {
        self.memento
    }

    /// Whether containment listeners are registered.
    pub fn is_enforcing(&self) -> bool {
        self.focus_listener.is_some()
    }

    /// Activate the trap for `container`.
    ///
    /// Safe to call again when a closing overlay re-opens: an existing
    /// memento is kept, and focus only moves if it is outside the container.
    pub fn on_mount(
        &mut self,
        doc: &mut Document,
        container: ElementId,
        auto_focus: bool,
        enforce_focus: bool,
    ) -> Result<(), DomError> {
        self.container = Some(container);
        if doc.tab_index(container).is_none() {
            doc.set_tab_index(container, Some(-1))?;
        }
        self.set_enforce(doc, enforce_focus);

        if auto_focus {
            let active = doc.active_element();
            let inside = active.is_some_and(|a| doc.contains(container, a));
            if !inside {
                if self.memento.is_none() {
                    self.memento = active;
                }
                let focused = Self::focus_inside(doc, container);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "focus_trap.mount",
                    memento = self.memento.map(|m| m.index()),
                    focused = focused.map(|t| t.index())
                );
                #[cfg(not(feature = "tracing"))]
                let _ = focused;
            }
        }
        Ok(())
    }

    /// Turn containment on or off while mounted.
    pub fn set_enforce(&mut self, doc: &mut Document, enforce: bool) {
        match (enforce, self.container) {
            (true, Some(container)) if self.focus_listener.is_none() => {
                self.focus_listener =
                    Some(doc.add_listener(ListenerKind::Focus, ListenerScope::Document));
                self.tab_listener = Some(doc.add_listener(
                    ListenerKind::KeyDown,
                    ListenerScope::Element(container),
                ));
            }
            (false, _) => self.remove_listeners(doc),
            _ => {}
        }
    }

    /// Apply containment to `event`. Returns `true` if focus was moved.
    pub fn enforce(&self, doc: &mut Document, event: &Event) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        match event {
            Event::Focus(focus)
                if self
                    .focus_listener
                    .is_some_and(|id| doc.listener_matches(id, event))
                    && !doc.contains(container, focus.target) =>
            {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "focus_trap.redirect", from = focus.target.index());
                Self::focus_inside(doc, container).is_some()
            }
            Event::Key(key)
                if matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
                    && key.kind != KeyEventKind::Release
                    && self
                        .tab_listener
                        .is_some_and(|id| doc.listener_matches(id, event)) =>
            {
                let backward = key.code == KeyCode::BackTab || key.shift();
                Self::cycle(doc, container, backward)
            }
            _ => false,
        }
    }

    /// Deactivate the trap and restore focus to the memento.
    pub fn on_unmount(&mut self, doc: &mut Document) -> Result<(), OverlayError> {
        self.remove_listeners(doc);
        self.container = None;
        let Some(memento) = self.memento.take() else {
            return Ok(());
        };
        if !doc.is_attached(memento) {
            return Err(OverlayError::StaleFocusTarget(memento));
        }
        let restored = doc.focus(memento);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "focus_trap.restore", target = memento.index(), restored);
        #[cfg(not(feature = "tracing"))]
        let _ = restored;
        Ok(())
    }

    /// Focus the preferred element inside `container`. Returns the element
    /// that took focus.
    pub fn focus_inside(doc: &mut Document, container: ElementId) -> Option<ElementId> {
        let preferred = doc
            .descendants(container)
            .into_iter()
            .find(|id| doc.attribute(*id, AUTOFOCUS_ATTR).is_some() && doc.is_focusable(*id));
        let candidates = preferred
            .into_iter()
            .chain(doc.tab_order(container).first().copied())
            .chain(std::iter::once(container));
        for candidate in candidates {
            if doc.focus(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn cycle(doc: &mut Document, container: ElementId, backward: bool) -> bool {
        let order = doc.tab_order(container);
        if order.is_empty() {
            return doc.focus(container);
        }
        let len = order.len();
        let current = doc
            .active_element()
            .and_then(|active| order.iter().position(|id| *id == active));
        let next = match (current, backward) {
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
            (None, false) => 0,
            (None, true) => len - 1,
        };
        doc.focus(order[next])
    }

    fn remove_listeners(&mut self, doc: &mut Document) {
        if let Some(id) = self.focus_listener.take() {
            doc.remove_listener(id);
        }
        if let Some(id) = self.tab_listener.take() {
            doc.remove_listener(id);
        }
    }
}
