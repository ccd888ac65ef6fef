#![forbid(unsafe_code)]

//! Section heading (`h1`..`h6`).

use veil_core::{Document, DomError, ElementId};

use crate::Widget;
use crate::classes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: u8,
    text: String,
}

impl Heading {
    /// Create a heading; `level` is clamped to 1..=6.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    pub fn h4(text: impl Into<String>) -> Self {
        Self::new(4, text)
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Widget for Heading {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        let id = doc.create_element(&format!("h{}", self.level));
        doc.add_class(id, classes::HEADING)?;
        let text = doc.create_text(self.text.as_str());
        doc.append_child(id, text)?;
        doc.append_child(parent, id)
    }
}
