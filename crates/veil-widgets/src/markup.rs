#![forbid(unsafe_code)]

//! Generic element builder.

use veil_core::{Document, DomError, ElementId};

use crate::{Child, Widget, child};

/// A plain element with classes, attributes and children.
///
/// ```ignore
/// let header = El::div()
///     .class(classes::DRAWER_HEADER)
///     .child(Icon::new("inbox"))
///     .child(Heading::h4("Drawer header"));
/// ```
#[derive(Clone)]
pub struct El {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    tab_index: Option<i32>,
    children: Vec<Child>,
}

impl El {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            tab_index: None,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn p() -> Self {
        Self::new("p")
    }

    /// Add whitespace-separated classes.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set an explicit tab index.
    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Append a child widget.
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(child(widget));
        self
    }

    /// Append already-shared children.
    pub fn children(mut self, children: impl IntoIterator<Item = Child>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(text.into())
    }

    /// Build the element under `parent` and return its id.
    pub fn build(&self, doc: &mut Document, parent: ElementId) -> Result<ElementId, DomError> {
        let id = doc.create_element(&self.tag);
        for class in &self.classes {
            doc.add_class(id, class)?;
        }
        for (name, value) in &self.attributes {
            doc.set_attribute(id, name, value.as_str())?;
        }
        if self.tab_index.is_some() {
            doc.set_tab_index(id, self.tab_index)?;
        }
        doc.append_child(parent, id)?;
        for child in &self.children {
            child.render(doc, id)?;
        }
        Ok(id)
    }
}

impl Widget for El {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        self.build(doc, parent).map(|_| ())
    }
}
