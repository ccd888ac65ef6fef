#![forbid(unsafe_code)]

//! Off-tree render destination.
//!
//! A portal is a `div.veil-portal` appended to a container element, by
//! default the document body. Overlay content renders into the portal root
//! rather than under its host, so it escapes the host's layout and
//! stacking.
//!
//! # Invariants
//!
//! - One acquire creates exactly one root; release removes exactly that
//!   root and its subtree.
//! - Handles share no state, so any number of overlays may hold one and
//!   release them in any order.
//! - The extra class name is applied to the portal root only.
//!
//! # Failure Modes
//!
//! - A requested container that is dead or detached is replaced by the
//!   body. The handle records the container it could not use so the caller
//!   can report it.
//! - Releasing an inline handle, or one whose root already left the
//!   document, does nothing.

use veil_core::{Document, DomError, ElementId};

use crate::classes;

/// Identifies a mounted portal root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortalHandle {
    root: Option<ElementId>,
    container: Option<ElementId>,
    rejected: Option<ElementId>,
    class_name: Option<String>,
}

impl PortalHandle {
    /// The null handle: content renders inline, nothing to release.
    pub fn inline() -> Self {
        Self::default()
    }

    /// Whether this is the null handle.
    pub fn is_inline(&self) -> bool {
        self.root.is_none()
    }

    /// The portal root element.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// The element the root was appended to.
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    /// The requested container, if it was unusable and the body was used
    /// instead.
    pub fn rejected_container(&self) -> Option<ElementId> {
        self.rejected
    }

    /// Extra class currently applied to the root.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Replace the extra class on the root.
    pub fn set_class_name(
        &mut self,
        doc: &mut Document,
        class_name: Option<&str>,
    ) -> Result<(), DomError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.class_name.as_deref() == class_name {
            return Ok(());
        }
        if let Some(old) = self.class_name.take() {
            doc.remove_class(root, &old)?;
        }
        // Keep the base class if the old extra class overlapped it.
        doc.add_class(root, classes::PORTAL)?;
        if let Some(new) = class_name {
            doc.add_class(root, new)?;
            self.class_name = Some(new.to_owned());
        }
        Ok(())
    }
}

/// Acquires and releases portal roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortalTarget;

impl PortalTarget {
    /// Create a portal root inside `container` (default: the body).
    pub fn acquire(
        doc: &mut Document,
        container: Option<ElementId>,
        class_name: Option<&str>,
    ) -> Result<PortalHandle, DomError> {
        let body = doc.body();
        let (target, rejected) = match container {
            Some(requested) if doc.is_attached(requested) && !doc.is_text(requested) => {
                (requested, None)
            }
            Some(requested) => (body, Some(requested)),
            None => (body, None),
        };

        let root = doc.create_element("div");
        doc.add_class(root, classes::PORTAL)?;
        let mut handle = PortalHandle {
            root: Some(root),
            container: Some(target),
            rejected,
            class_name: None,
        };
        handle.set_class_name(doc, class_name)?;
        doc.append_child(target, root)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "portal.acquire",
            root = root.index(),
            container = target.index(),
            fell_back = rejected.is_some()
        );
        Ok(handle)
    }

    /// Remove the portal root and everything rendered into it.
    pub fn release(doc: &mut Document, handle: PortalHandle) -> Result<(), DomError> {
        let Some(root) = handle.root else {
            return Ok(());
        };
        if !doc.exists(root) {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "portal.release", root = root.index());
        doc.remove(root)
    }
}
