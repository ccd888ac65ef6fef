#![forbid(unsafe_code)]

//! Document error type.

use std::fmt;

use crate::dom::ElementId;

/// Errors raised by structural document operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomError {
    /// The id does not resolve to a live node.
    NotFound(ElementId),
    /// The operation needs an element but got a text node.
    NotAnElement(ElementId),
    /// Appending would create a cycle (or move `body`).
    HierarchyRequest {
        parent: ElementId,
        child: ElementId,
    },
    /// `body` cannot be removed.
    RootRemoval,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "node {}v{} not found", id.index(), id.generation()),
            Self::NotAnElement(id) => {
                write!(f, "node {}v{} is not an element", id.index(), id.generation())
            }
            Self::HierarchyRequest { parent, child } => write!(
                f,
                "cannot append node {} under node {}",
                child.index(),
                parent.index()
            ),
            Self::RootRemoval => f.write_str("the body element cannot be removed"),
        }
    }
}

impl std::error::Error for DomError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn display_names_the_node() {
        let doc = Document::new();
        let msg = DomError::NotFound(doc.body()).to_string();
        assert_eq!(msg, "node 0v0 not found");
        assert_eq!(
            DomError::RootRemoval.to_string(),
            "the body element cannot be removed"
        );
    }
}
