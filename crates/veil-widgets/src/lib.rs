#![forbid(unsafe_code)]

//! Widgets for veil: the Overlay lifecycle primitive and the Drawer.
//!
//! # Role in veil
//! Widgets render themselves into a [`Document`] under a parent element.
//! Stateless presentational pieces ([`Button`], [`Icon`], [`Heading`],
//! [`El`]) implement [`Widget`] directly. Stateful components
//! ([`Overlay`], [`Drawer`]) live across renders: the host calls `render`
//! with fresh props, `tick` with elapsed time, and `handle_event` with
//! input, and the component drives every side effect itself.

pub mod button;
pub mod classes;
pub mod drawer;
pub mod heading;
pub mod icon;
pub mod markup;
pub mod overlay;

use std::rc::Rc;

use veil_core::{Document, DomError, ElementId};

pub use button::Button;
pub use drawer::{Drawer, DrawerPosition, DrawerProps, DrawerSize};
pub use heading::Heading;
pub use icon::{Icon, IconSize};
pub use markup::El;
pub use overlay::{
    CloseReason, DismissFlags, Overlay, OverlayConfig, OverlayError, TransitionPhase,
};

/// A `Widget` is a renderable component.
///
/// Widgets append their nodes as the last children of `parent`.
pub trait Widget {
    /// Render the widget into the document under `parent`.
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError>;
}

impl std::fmt::Debug for dyn Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<widget>")
    }
}

/// Shared, re-renderable child content.
pub type Child = Rc<dyn Widget>;

/// Wrap a widget as [`Child`] content.
pub fn child(widget: impl Widget + 'static) -> Child {
    Rc::new(widget)
}

/// Outcome of routing an event through a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The component acted on the event; no further handling should run.
    Consumed,
    /// The component did not act on the event.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

impl Widget for &str {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        let text = doc.create_text(*self);
        doc.append_child(parent, text)
    }
}

impl Widget for String {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        self.as_str().render(doc, parent)
    }
}

impl<W: Widget + ?Sized> Widget for Rc<W> {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        (**self).render(doc, parent)
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        (**self).render(doc, parent)
    }
}

impl<W: Widget> Widget for Vec<W> {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        for widget in self {
            widget.render(doc, parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_widgets_append_text_nodes() {
        let mut doc = Document::new();
        let body = doc.body();
        "hello ".render(&mut doc, body).unwrap();
        String::from("world").render(&mut doc, body).unwrap();
        assert_eq!(doc.children(body).len(), 2);
        assert_eq!(doc.text_content(body), "hello world");
    }

    #[test]
    fn vec_renders_in_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let items: Vec<Child> = vec![child("a"), child("b"), child("c")];
        items.render(&mut doc, body).unwrap();
        assert_eq!(doc.text_content(body), "abc");
    }

    #[test]
    fn event_result_consumed() {
        assert!(EventResult::Consumed.is_consumed());
        assert!(!EventResult::Ignored.is_consumed());
    }
}
