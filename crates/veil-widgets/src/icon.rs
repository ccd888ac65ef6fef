#![forbid(unsafe_code)]

//! Named icon glyph.

use veil_core::{Document, DomError, ElementId};

use crate::Widget;
use crate::classes;

/// Icon size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    #[default]
    Standard,
    Large,
}

impl IconSize {
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Standard => 16,
            Self::Large => 20,
        }
    }
}

/// A named icon rendered as `span.veil-icon.veil-icon-<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    name: String,
    size: IconSize,
}

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: IconSize::Standard,
        }
    }

    pub fn size(mut self, size: IconSize) -> Self {
        self.size = size;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self, doc: &mut Document, parent: ElementId) -> Result<ElementId, DomError> {
        let id = doc.create_element("span");
        doc.add_class(id, classes::ICON)?;
        doc.add_class(id, &classes::icon_class(&self.name))?;
        doc.set_attribute(id, "data-icon", self.name.as_str())?;
        doc.set_attribute(id, "data-size", self.size.pixels().to_string())?;
        doc.set_attribute(id, "aria-hidden", "true")?;
        doc.append_child(parent, id)?;
        Ok(id)
    }
}

impl Widget for Icon {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        self.build(doc, parent).map(|_| ())
    }
}
