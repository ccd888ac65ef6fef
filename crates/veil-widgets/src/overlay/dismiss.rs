#![forbid(unsafe_code)]

//! Escape-key and outside-click dismissal.
//!
//! The controller holds the listeners that observe dismissal input for one
//! mounted overlay and classifies events against them. It never calls
//! `on_close` itself; it reports what the input means and the overlay
//! decides.
//!
//! # Invariants
//!
//! - Listeners exist exactly between `attach` and `detach`.
//! - A disabled flag suppresses the action, not the observation: the
//!   listener stays registered and the input is reported as
//!   [`Dismissal::Suppressed`].
//! - Only pointer-down counts as an outside click; a click that starts on
//!   content and ends on the backdrop does not dismiss.

use bitflags::bitflags;
use veil_core::event::{Event, KeyCode, KeyEventKind, PointerEventKind};
use veil_core::listener::{ListenerId, ListenerKind, ListenerScope};
use veil_core::{Document, ElementId};

use super::config::CloseReason;

bitflags! {
    /// Which dismissal inputs may close the overlay.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DismissFlags: u8 {
        const ESCAPE_KEY    = 0b01;
        const OUTSIDE_CLICK = 0b10;
    }
}

impl DismissFlags {
    fn allows(self, reason: CloseReason) -> bool {
        match reason {
            CloseReason::EscapeKey => self.contains(Self::ESCAPE_KEY),
            CloseReason::OutsideClick => self.contains(Self::OUTSIDE_CLICK),
            CloseReason::CloseButton => true,
        }
    }
}

/// Classification of an event against the dismissal listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// The input asks to close and its flag is enabled.
    Close(CloseReason),
    /// The input was observed but its flag is disabled.
    Suppressed(CloseReason),
    /// Not a dismissal input.
    Unrelated,
}

/// Listener bookkeeping for dismissal input.
#[derive(Debug, Clone, Default)]
pub struct DismissController {
    container: Option<ElementId>,
    key: Option<ListenerId>,
    pointer: Option<ListenerId>,
}

impl DismissController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether listeners are registered.
    pub fn is_attached(&self) -> bool {
        self.key.is_some() || self.pointer.is_some()
    }

    /// Register listeners for `container`.
    ///
    /// Escape is observed on the container. Outside clicks are observed on
    /// `backdrop` when there is one, otherwise on the whole document.
    /// Re-attaching replaces any previous registration.
    pub fn attach(&mut self, doc: &mut Document, container: ElementId, backdrop: Option<ElementId>) {
        self.detach(doc);
        self.container = Some(container);
        self.key = Some(doc.add_listener(
            ListenerKind::KeyDown,
            ListenerScope::Element(container),
        ));
        let pointer_scope = backdrop.map_or(ListenerScope::Document, ListenerScope::Element);
        self.pointer = Some(doc.add_listener(ListenerKind::PointerDown, pointer_scope));
    }

    /// Remove every listener this controller registered.
    pub fn detach(&mut self, doc: &mut Document) {
        if let Some(id) = self.key.take() {
            doc.remove_listener(id);
        }
        if let Some(id) = self.pointer.take() {
            doc.remove_listener(id);
        }
        self.container = None;
    }

    /// Classify `event`.
    pub fn handle(&self, doc: &Document, event: &Event, flags: DismissFlags) -> Dismissal {
        let Some(reason) = self.reason(doc, event) else {
            return Dismissal::Unrelated;
        };
        if flags.allows(reason) {
            Dismissal::Close(reason)
        } else {
            Dismissal::Suppressed(reason)
        }
    }

    fn reason(&self, doc: &Document, event: &Event) -> Option<CloseReason> {
        match event {
            Event::Key(key)
                if key.code == KeyCode::Escape
                    && key.kind == KeyEventKind::Press
                    && self.key.is_some_and(|id| doc.listener_matches(id, event)) =>
            {
                Some(CloseReason::EscapeKey)
            }
            Event::Pointer(pointer) if matches!(pointer.kind, PointerEventKind::Down(_)) => {
                let id = self.pointer?;
                if !doc.listener_matches(id, event) {
                    return None;
                }
                // A document-wide listener sees content clicks too.
                let inside = self
                    .container
                    .is_some_and(|container| doc.contains(container, pointer.target));
                let document_scoped = doc
                    .listeners()
                    .get(id)
                    .is_some_and(|l| l.scope == ListenerScope::Document);
                (!(document_scoped && inside)).then_some(CloseReason::OutsideClick)
            }
            _ => None,
        }
    }
}
