#![forbid(unsafe_code)]

//! In-memory document model.
//!
//! A [`Document`] owns every node in a generational arena. Widgets render by
//! creating elements and appending them under a parent; overlays move whole
//! subtrees in and out of the tree as they mount and unmount.
//!
//! # Invariants
//!
//! 1. The document always has exactly one `body` element, which cannot be
//!    removed. A node is *attached* iff its parent chain reaches `body`.
//! 2. Ids are generational: once a node is removed its id never resolves
//!    again, even if the slot is reused.
//! 3. The tree is acyclic: `append_child` rejects moving a node under one
//!    of its own descendants.
//! 4. `active_element()` is either `None` or an attached, live element.
//!
//! # Failure Modes
//!
//! - Structural mutations on dead ids return [`DomError::NotFound`].
//! - Queries on dead ids return empty results instead of failing.

use bitflags::bitflags;

use crate::error::DomError;
use crate::event::Event;
use crate::listener::{ListenerId, ListenerKind, ListenerRegistry, ListenerScope};

/// Tags that can take focus without an explicit tab index.
const NATIVELY_FOCUSABLE: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Generational handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    /// Slot index (stable for the node's lifetime).
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a tag name.
    Element { tag: String },
    /// A text node.
    Text(String),
}

bitflags! {
    /// Per-node state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Element is disabled and cannot take focus.
        const DISABLED = 0b0001;
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    tab_index: Option<i32>,
    flags: NodeFlags,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            attributes: Vec::new(),
            tab_index: None,
            flags: NodeFlags::empty(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A compound selector: optional tag plus any number of classes
/// (`div.a.b`, `.a.b`, `button`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a compound selector. Empty input matches every element.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut parts = input.trim().split('.');
        let tag = parts
            .next()
            .filter(|t| !t.is_empty())
            .map(str::to_ascii_lowercase);
        let classes = parts
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect();
        Self { tag, classes }
    }

    /// Whether `id` matches this selector in `doc`.
    #[must_use]
    pub fn matches(&self, doc: &Document, id: ElementId) -> bool {
        let Some(node) = doc.node(id) else {
            return false;
        };
        let NodeKind::Element { tag } = &node.kind else {
            return false;
        };
        if let Some(want) = &self.tag
            && want != tag
        {
            return false;
        }
        self.classes.iter().all(|c| node.classes.contains(c))
    }
}

/// The document: node arena, focus state and listener registry.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: ElementId,
    active: Option<ElementId>,
    listeners: ListenerRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only `body`.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: ElementId {
                index: 0,
                generation: 0,
            },
            active: None,
            listeners: ListenerRegistry::new(),
        };
        doc.body = doc.alloc(NodeKind::Element {
            tag: "body".to_owned(),
        });
        doc
    }

    /// The top-level body element.
    #[inline]
    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    // --- Arena ---

    fn alloc(&mut self, kind: NodeKind) -> ElementId {
        let node = Node::new(kind);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            ElementId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            ElementId {
                index,
                generation: 0,
            }
        }
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, DomError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DomError::NotFound(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Node, DomError> {
        let node = self.node_mut(id)?;
        if node.is_element() {
            Ok(node)
        } else {
            Err(DomError::NotAnElement(id))
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.alloc(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> ElementId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn exists(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, `body` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Always false: `body` is permanent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    // --- Tree structure ---

    /// Append `child` as the last child of `parent`, moving it if it
    /// already has a parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.element_mut(parent)?;
        self.node_mut(child)?;
        if child == self.body || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.element_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Insert `child` into `parent` before `reference`; `None` appends.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> Result<(), DomError> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if reference == child {
            return Ok(());
        }
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotFound(reference));
        }
        self.append_child(parent, child)?;
        let children = &mut self.element_mut(parent)?.children;
        children.pop();
        let at = children
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(children.len());
        children.insert(at, child);
        Ok(())
    }

    /// Unlink `id` from its parent, keeping the subtree alive.
    pub fn detach(&mut self, id: ElementId) -> Result<(), DomError> {
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        if self.active.is_some_and(|active| !self.is_attached(active)) {
            self.active = None;
        }
        Ok(())
    }

    /// Destroy `id` and its whole subtree.
    ///
    /// Listeners scoped to destroyed elements are dropped, and focus is
    /// cleared if it was inside the subtree.
    pub fn remove(&mut self, id: ElementId) -> Result<(), DomError> {
        if id == self.body {
            return Err(DomError::RootRemoval);
        }
        self.detach(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for dead in &doomed {
            if let Some(slot) = self.slots.get_mut(dead.index as usize)
                && slot.generation == dead.generation
            {
                slot.node = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(dead.index);
            }
        }
        if self.active.is_some_and(|active| doomed.contains(&active)) {
            self.active = None;
        }
        self.listeners.remove_scoped(&doomed);
        Ok(())
    }

    /// Destroy every child of `id`.
    pub fn clear_children(&mut self, id: ElementId) -> Result<(), DomError> {
        let children = self.element_mut(id)?.children.clone();
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }

    /// Parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of `id` in order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if !self.exists(ancestor) {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `id` is live and reachable from `body`.
    #[must_use]
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.exists(id) && self.contains(self.body, id)
    }

    /// All descendants of `scope` in tree (pre-)order, `scope` excluded.
    #[must_use]
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // --- Node data ---

    /// Tag name of an element (`None` for text or dead nodes).
    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether `id` is a live text node.
    #[must_use]
    pub fn is_text(&self, id: ElementId) -> bool {
        self.node(id)
            .is_some_and(|n| matches!(n.kind, NodeKind::Text(_)))
    }

    /// Concatenated text of `id` and its descendants.
    #[must_use]
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text(text)) = self.node(id).map(|n| &n.kind) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(NodeKind::Text(text)) = self.node(node).map(|n| &n.kind) {
                out.push_str(text);
            }
        }
        out
    }

    /// Add one or more whitespace-separated classes. Existing classes are
    /// not duplicated.
    pub fn add_class(&mut self, id: ElementId, classes: &str) -> Result<(), DomError> {
        let node = self.element_mut(id)?;
        for class in classes.split_whitespace() {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        }
        Ok(())
    }

    /// Remove one or more whitespace-separated classes.
    pub fn remove_class(&mut self, id: ElementId, classes: &str) -> Result<(), DomError> {
        let node = self.element_mut(id)?;
        for class in classes.split_whitespace() {
            node.classes.retain(|c| c != class);
        }
        Ok(())
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Class list of the element.
    #[must_use]
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.node(id).map_or(&[], |n| n.classes.as_slice())
    }

    /// Set (or replace) an attribute.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let node = self.element_mut(id)?;
        let value = value.into();
        if let Some(slot) = node.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            node.attributes.push((name.to_owned(), value));
        }
        Ok(())
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attributes.retain(|(k, _)| k != name);
        Ok(())
    }

    /// Read an attribute.
    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or clear the explicit tab index.
    pub fn set_tab_index(&mut self, id: ElementId, tab_index: Option<i32>) -> Result<(), DomError> {
        self.element_mut(id)?.tab_index = tab_index;
        Ok(())
    }

    /// Mark the element disabled (or enabled).
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), DomError> {
        self.element_mut(id)?.flags.set(NodeFlags::DISABLED, disabled);
        if disabled && self.active == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    /// Explicit tab index, or 0 for natively focusable tags.
    #[must_use]
    pub fn tab_index(&self, id: ElementId) -> Option<i32> {
        let node = self.node(id)?;
        let NodeKind::Element { tag } = &node.kind else {
            return None;
        };
        node.tab_index
            .or_else(|| NATIVELY_FOCUSABLE.contains(&tag.as_str()).then_some(0))
    }

    // --- Queries ---

    /// Descendants of `scope` carrying `class`, in tree order.
    #[must_use]
    pub fn query_class(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Descendants of `scope` matching a compound selector, in tree order.
    #[must_use]
    pub fn query_selector_all(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let selector = Selector::parse(selector);
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    /// First descendant of `scope` matching a compound selector.
    #[must_use]
    pub fn query_selector(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let selector = Selector::parse(selector);
        self.descendants(scope)
            .into_iter()
            .find(|id| selector.matches(self, *id))
    }

    // --- Focus ---

    /// Whether `id` can currently take focus.
    #[must_use]
    pub fn is_focusable(&self, id: ElementId) -> bool {
        self.tab_index(id).is_some()
            && self
                .node(id)
                .is_some_and(|n| !n.flags.contains(NodeFlags::DISABLED))
            && self.is_attached(id)
    }

    /// Focusable descendants of `scope` in tab order.
    ///
    /// Elements with a positive tab index come first (ascending), followed
    /// by tab index 0 in tree order. Negative indices are skipped.
    #[must_use]
    pub fn tab_order(&self, scope: ElementId) -> Vec<ElementId> {
        let mut ordered: Vec<(i32, ElementId)> = self
            .descendants(scope)
            .into_iter()
            .filter(|id| self.is_focusable(*id))
            .filter_map(|id| self.tab_index(id).map(|tab| (tab, id)))
            .filter(|(tab, _)| *tab >= 0)
            .collect();
        // Stable sort keeps tree order within equal keys.
        ordered.sort_by_key(|(tab, _)| (*tab == 0, *tab));
        ordered.into_iter().map(|(_, id)| id).collect()
    }

    /// Move focus to `id`. Returns `false` if it cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Currently focused element.
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    // --- Listeners ---

    /// The listener registry.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Register a listener.
    pub fn add_listener(&mut self, kind: ListenerKind, scope: ListenerScope) -> ListenerId {
        self.listeners.add(kind, scope)
    }

    /// Remove a listener. Returns `true` if it was live.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Whether `event` should be delivered to listener `id`: the listener
    /// is live, observes this kind of event, and the target lies within
    /// its scope.
    #[must_use]
    pub fn listener_matches(&self, id: ListenerId, event: &Event) -> bool {
        let Some(listener) = self.listeners.get(id) else {
            return false;
        };
        if listener.kind != event.listener_kind() {
            return false;
        }
        match listener.scope {
            ListenerScope::Document => true,
            ListenerScope::Element(scope) => self.contains(scope, event.target()),
        }
    }
}
