#![forbid(unsafe_code)]

//! Event listener registry.
//!
//! Listeners are bookkeeping records, not closures: a component registers a
//! listener for the lifetime it wants to observe events and removes it when
//! it is done. Routing code asks [`Document::listener_matches`] whether a
//! given event falls inside a listener's scope.
//!
//! # Invariants
//!
//! - Listener ids are never reused within one registry.
//! - Removing a listener twice is a no-op that returns `false`.
//! - `len()` counts only live listeners, so tests can assert that nothing
//!   leaks after a component unmounts.
//!
//! [`Document::listener_matches`]: crate::dom::Document::listener_matches

use ahash::AHashMap;

use crate::dom::ElementId;

/// Identifier for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Kind of event a listener observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    KeyUp,
    PointerDown,
    PointerUp,
    Click,
    Focus,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Observes events anywhere in the document.
    Document,
    /// Observes events targeted at the element or its descendants.
    Element(ElementId),
}

/// A registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub kind: ListenerKind,
    pub scope: ListenerScope,
}

/// Registry of live listeners for one document.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    listeners: AHashMap<ListenerId, Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its id.
    pub fn add(&mut self, kind: ListenerKind, scope: ListenerScope) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Listener { kind, scope });
        id
    }

    /// Remove a listener. Returns `true` if it was live.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Look up a live listener.
    #[must_use]
    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.listeners.get(&id)
    }

    /// Whether the listener is still registered.
    #[must_use]
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Number of live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of live listeners of one kind.
    #[must_use]
    pub fn len_kind(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|l| l.kind == kind).count()
    }

    /// Drop every listener scoped to one of `elements`.
    pub(crate) fn remove_scoped(&mut self, elements: &[ElementId]) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|_, listener| match listener.scope {
            ListenerScope::Element(el) => !elements.contains(&el),
            ListenerScope::Document => true,
        });
        before - self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn ids_are_not_reused() {
        let mut reg = ListenerRegistry::new();
        let a = reg.add(ListenerKind::KeyDown, ListenerScope::Document);
        assert!(reg.remove(a));
        let b = reg.add(ListenerKind::KeyDown, ListenerScope::Document);
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn double_remove_is_noop() {
        let mut reg = ListenerRegistry::new();
        let id = reg.add(ListenerKind::Focus, ListenerScope::Document);
        assert!(reg.remove(id));
        assert!(!reg.remove(id));
        assert!(reg.is_empty());
    }

    #[test]
    fn len_kind_counts_per_kind() {
        let doc = Document::new();
        let mut reg = ListenerRegistry::new();
        reg.add(ListenerKind::KeyDown, ListenerScope::Element(doc.body()));
        reg.add(ListenerKind::PointerDown, ListenerScope::Document);
        reg.add(ListenerKind::PointerDown, ListenerScope::Document);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.len_kind(ListenerKind::PointerDown), 2);
        assert_eq!(reg.len_kind(ListenerKind::Focus), 0);
    }

    #[test]
    fn remove_scoped_keeps_document_listeners() {
        let doc = Document::new();
        let mut reg = ListenerRegistry::new();
        let body = doc.body();
        reg.add(ListenerKind::KeyDown, ListenerScope::Element(body));
        let keep = reg.add(ListenerKind::Focus, ListenerScope::Document);
        assert_eq!(reg.remove_scoped(&[body]), 1);
        assert!(reg.is_live(keep));
    }
}
