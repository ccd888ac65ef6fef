#![forbid(unsafe_code)]

//! Push button with optional icon and text.
//!
//! A button renders a native `button` element, so it takes focus and
//! appears in tab order. Click handling belongs to whoever owns the button:
//! build it with [`Button::build`] to learn its element id, then match
//! click events whose target lies inside it (see [`Button::is_click`]).

use veil_core::event::{Event, PointerEventKind};
use veil_core::{Document, DomError, ElementId};

use crate::Widget;
use crate::classes;
use crate::icon::Icon;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Button {
    text: Option<String>,
    icon: Option<String>,
    class: Option<String>,
    minimal: bool,
    aria_label: Option<String>,
    kind: Option<String>,
    disabled: bool,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Form role, e.g. `"submit"`. Defaults to `"button"`.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Build the button under `parent` and return its element id.
    pub fn build(&self, doc: &mut Document, parent: ElementId) -> Result<ElementId, DomError> {
        let id = doc.create_element("button");
        doc.add_class(id, classes::BUTTON)?;
        if self.minimal {
            doc.add_class(id, classes::MINIMAL)?;
        }
        if let Some(class) = &self.class {
            doc.add_class(id, class)?;
        }
        doc.set_attribute(id, "type", self.kind.as_deref().unwrap_or("button"))?;
        if let Some(label) = &self.aria_label {
            doc.set_attribute(id, "aria-label", label.as_str())?;
        }
        doc.set_disabled(id, self.disabled)?;
        doc.append_child(parent, id)?;
        if let Some(icon) = &self.icon {
            Icon::new(icon.as_str()).build(doc, id)?;
        }
        if let Some(text) = &self.text {
            let span = doc.create_element("span");
            let node = doc.create_text(text.as_str());
            doc.append_child(span, node)?;
            doc.append_child(id, span)?;
        }
        Ok(id)
    }

    /// Whether `event` is a click landing on the button built as `id`.
    pub fn is_click(doc: &Document, id: ElementId, event: &Event) -> bool {
        matches!(
            event,
            Event::Pointer(pointer)
                if matches!(pointer.kind, PointerEventKind::Click(_))
                    && doc.contains(id, pointer.target)
        )
    }
}

impl Widget for Button {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        self.build(doc, parent).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_icon_and_text() {
        let mut doc = Document::new();
        let body = doc.body();
        let id = Button::new()
            .icon("small-cross")
            .text("Close")
            .minimal(true)
            .build(&mut doc, body)
            .unwrap();
        assert!(doc.has_class(id, classes::BUTTON));
        assert!(doc.has_class(id, classes::MINIMAL));
        assert_eq!(doc.attribute(id, "type"), Some("button"));
        assert_eq!(doc.query_class(id, classes::ICON).len(), 1);
        assert_eq!(doc.text_content(id), "Close");
        assert!(doc.focus(id));
    }

    #[test]
    fn click_inside_button_is_detected() {
        let mut doc = Document::new();
        let body = doc.body();
        let id = Button::new().icon("add").build(&mut doc, body).unwrap();
        let icon = doc.children(id)[0];
        assert!(Button::is_click(&doc, id, &Event::click(icon)));
        assert!(!Button::is_click(&doc, id, &Event::pointer_down(icon)));
        assert!(!Button::is_click(&doc, id, &Event::click(body)));
    }

    #[test]
    fn disabled_button_cannot_focus() {
        let mut doc = Document::new();
        let body = doc.body();
        let id = Button::new()
            .text("Nope")
            .disabled(true)
            .build(&mut doc, body)
            .unwrap();
        assert!(!doc.focus(id));
    }
}
