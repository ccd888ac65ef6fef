#![forbid(unsafe_code)]

//! The overlay: transition, portal, focus trap and dismissal composed.
//!
//! # Rendered structure
//!
//! ```text
//! container (default: body)
//! └── div.veil-portal[.portal_class_name]          (omitted when inline)
//!     └── div.veil-overlay.veil-overlay-open[.class_name][data-transition]
//!         ├── div.veil-overlay-backdrop            (when has_backdrop)
//!         └── <child>.veil-overlay-content ...
//! ```
//!
//! # Driving the overlay
//!
//! The owner calls [`Overlay::render`] with a fresh [`OverlayConfig`] every
//! time its props change, [`Overlay::tick`] with elapsed time so timed
//! phases complete, and [`Overlay::handle_event`] for every input event.
//! Before dropping a mounted overlay call [`Overlay::unmount`]; the overlay
//! holds no document reference and cannot clean up on drop.
//!
//! # Invariants
//!
//! 1. Nodes exist iff the phase is `Opening`, `Open` or `Closing`.
//! 2. Listeners exist exactly while nodes exist; after `Closed` the
//!    overlay holds none.
//! 3. Lifecycle callbacks fire once per phase entry, after the phase's DOM
//!    work (`on_opening` sees mounted content, `on_closed` runs before the
//!    nodes are removed).
//! 4. `on_close` fires only while the owner still asks for the overlay to
//!    be open.
//!
//! # Failure Modes
//!
//! Nothing is returned to the caller. Contradictory configuration, a stale
//! focus memento, an unusable portal container and failed document
//! operations are recorded in [`Overlay::diagnostics`] and logged, and the
//! overlay carries on with the closest sensible behavior.

use std::fmt;
use std::time::Duration;

use veil_core::event::Event;
use veil_core::{Document, DomError, ElementId};

use super::config::{CloseReason, OverlayConfig};
use super::dismiss::{DismissController, Dismissal};
use super::error::OverlayError;
use super::focus_trap::FocusTrap;
use super::portal::{PortalHandle, PortalTarget};
use super::transition::{TransitionController, TransitionPhase};
use crate::{Child, EventResult, classes};

/// Attribute naming the current transition phase on the container.
pub const TRANSITION_ATTR: &str = "data-transition";

/// Nodes owned by a mounted overlay.
#[derive(Debug, Clone)]
struct Mounted {
    portal: PortalHandle,
    container: ElementId,
    backdrop: Option<ElementId>,
    class_name: Option<String>,
    backdrop_class_name: Option<String>,
}

/// Generic modal-lifecycle primitive.
#[derive(Default)]
pub struct Overlay {
    config: OverlayConfig,
    host: Option<ElementId>,
    children: Vec<Child>,
    transition: TransitionController,
    trap: FocusTrap,
    dismiss: DismissController,
    mounted: Option<Mounted>,
    diagnostics: Vec<OverlayError>,
}

impl fmt::Debug for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("config", &self.config)
            .field("host", &self.host)
            .field("children", &self.children.len())
            .field("transition", &self.transition)
            .field("mounted", &self.mounted)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a new configuration and child content.
    ///
    /// `host` is where inline (non-portal) content is mounted. Phase
    /// changes caused by `config.is_open` take effect, and fire their
    /// callbacks, before this returns. While mounted, child content is
    /// re-rendered on every call.
    pub fn render(
        &mut self,
        doc: &mut Document,
        host: ElementId,
        config: OverlayConfig,
        children: &[Child],
    ) {
        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "overlay.render",
            is_open = config.is_open,
            phase = self.phase().as_str(),
            children = children.len()
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        #[cfg(feature = "tracing")]
        if config.is_open && children.is_empty() {
            tracing::warn!(message = "overlay.empty_content");
        }

        self.config = config;
        self.host = Some(host);
        self.children = children.to_vec();

        let was_mounted = self.mounted.is_some();
        let entered = self
            .transition
            .request(self.config.is_open, self.config.transition_duration);
        self.enter_all(doc, &entered);

        if self.mounted.is_some() {
            let fresh = !was_mounted;
            let result = self.sync_shell(doc);
            self.absorb(result);
            if !fresh {
                let result = self.render_content(doc);
                self.absorb(result);
            }
        }
    }

    /// Advance transition timers by `dt`.
    pub fn tick(&mut self, doc: &mut Document, dt: Duration) {
        let entered = self.transition.tick(dt);
        self.enter_all(doc, &entered);
    }

    /// Route an input event through focus containment and dismissal.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> EventResult {
        if self.mounted.is_none() {
            return EventResult::Ignored;
        }
        if self.trap.enforce(doc, event) {
            return EventResult::Consumed;
        }
        match self.dismiss.handle(doc, event, self.config.dismiss_flags()) {
            Dismissal::Close(reason) => {
                self.request_close(reason);
                EventResult::Consumed
            }
            Dismissal::Suppressed(_reason) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "overlay.dismiss_suppressed", reason = ?_reason);
                EventResult::Ignored
            }
            Dismissal::Unrelated => EventResult::Ignored,
        }
    }

    /// Ask the owner to close the overlay via `on_close`.
    ///
    /// Does nothing unless the owner currently requests the overlay open.
    /// Returns whether the callback ran.
    pub fn request_close(&self, reason: CloseReason) -> bool {
        if !self.transition.requested_open() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "overlay.dismiss", reason = ?reason);
        match &self.config.on_close {
            Some(on_close) => {
                on_close(reason);
                true
            }
            None => false,
        }
    }

    /// Tear down immediately without lifecycle callbacks.
    pub fn unmount(&mut self, doc: &mut Document) {
        self.transition.reset();
        self.teardown(doc);
    }

    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    /// Elapsed fraction of the current timed phase.
    pub fn progress(&self) -> f64 {
        self.transition.progress()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The overlay container element.
    pub fn container(&self) -> Option<ElementId> {
        self.mounted.as_ref().map(|m| m.container)
    }

    pub fn backdrop(&self) -> Option<ElementId> {
        self.mounted.as_ref().and_then(|m| m.backdrop)
    }

    /// The portal root, when portaled.
    pub fn portal_root(&self) -> Option<ElementId> {
        self.mounted.as_ref().and_then(|m| m.portal.root())
    }

    /// Errors absorbed since creation (or the last `take_diagnostics`).
    pub fn diagnostics(&self) -> &[OverlayError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<OverlayError> {
        std::mem::take(&mut self.diagnostics)
    }

    // --- Phase handling ---

    fn enter_all(&mut self, doc: &mut Document, entered: &[TransitionPhase]) {
        for &phase in entered {
            self.enter(doc, phase);
        }
    }

    fn enter(&mut self, doc: &mut Document, phase: TransitionPhase) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "overlay.transition",
            phase = phase.as_str(),
            duration_ms = self.transition.duration().as_millis() as u64
        );

        if phase == TransitionPhase::Opening {
            let result = match self.mounted.as_ref().map(|m| m.container) {
                None => self.mount(doc),
                Some(container) => self
                    .trap
                    .on_mount(
                        doc,
                        container,
                        self.config.auto_focus,
                        self.config.enforce_focus,
                    )
                    .map_err(OverlayError::from),
            };
            self.absorb(result);
        }

        let Some(container) = self.container() else {
            return;
        };
        if phase != TransitionPhase::Closed {
            let result = doc.set_attribute(container, TRANSITION_ATTR, phase.as_str());
            self.absorb(result.map_err(OverlayError::from));
        }

        let callback = match phase {
            TransitionPhase::Opening => &self.config.on_opening,
            TransitionPhase::Open => &self.config.on_opened,
            TransitionPhase::Closing => &self.config.on_closing,
            TransitionPhase::Closed => &self.config.on_closed,
        };
        if let Some(callback) = callback {
            callback(container);
        }

        if phase == TransitionPhase::Closed {
            self.teardown(doc);
        }
    }

    fn mount(&mut self, doc: &mut Document) -> Result<(), OverlayError> {
        let use_portal = self.config.use_portal;
        let requested = self.config.portal_container;
        let portal_class = self.config.portal_class_name.clone();

        let portal = if use_portal {
            let handle = PortalTarget::acquire(doc, requested, portal_class.as_deref())?;
            if let (Some(requested), Some(fallback)) =
                (handle.rejected_container(), handle.container())
            {
                self.record(OverlayError::MissingContainer {
                    requested,
                    fallback,
                });
            }
            handle
        } else {
            if requested.is_some() {
                self.record(OverlayError::ConfigurationConflict {
                    ignored: "portal_container",
                });
            }
            if portal_class.is_some() {
                self.record(OverlayError::ConfigurationConflict {
                    ignored: "portal_class_name",
                });
            }
            PortalHandle::inline()
        };

        let parent = match (portal.root(), self.host) {
            (Some(root), _) => root,
            (None, Some(host)) if doc.is_attached(host) && !doc.is_text(host) => host,
            (None, Some(host)) => {
                let fallback = doc.body();
                self.record(OverlayError::MissingContainer {
                    requested: host,
                    fallback,
                });
                fallback
            }
            (None, None) => doc.body(),
        };
        let container = doc.create_element("div");
        doc.add_class(container, classes::OVERLAY)?;
        doc.add_class(container, classes::OVERLAY_OPEN)?;
        if portal.is_inline() {
            doc.add_class(container, classes::OVERLAY_INLINE)?;
        }
        if let Err(err) = doc.append_child(parent, container) {
            let _ = doc.remove(container);
            if !portal.is_inline() {
                let _ = PortalTarget::release(doc, portal);
            }
            return Err(err.into());
        }
        self.mounted = Some(Mounted {
            portal,
            container,
            backdrop: None,
            class_name: None,
            backdrop_class_name: None,
        });

        self.sync_shell(doc)?;
        self.render_content(doc)?;
        self.trap.on_mount(
            doc,
            container,
            self.config.auto_focus,
            self.config.enforce_focus,
        )?;
        Ok(())
    }

    fn teardown(&mut self, doc: &mut Document) {
        let restored = self.trap.on_unmount(doc);
        self.absorb(restored);
        self.dismiss.detach(doc);
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        let result = if mounted.portal.is_inline() {
            if doc.exists(mounted.container) {
                doc.remove(mounted.container)
            } else {
                Ok(())
            }
        } else {
            PortalTarget::release(doc, mounted.portal)
        };
        self.absorb(result.map_err(OverlayError::from));
    }

    // --- Keeping mounted nodes in line with the config ---

    /// Bring classes, backdrop and listeners in line with the config.
    fn sync_shell(&mut self, doc: &mut Document) -> Result<(), OverlayError> {
        let config = &self.config;
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(());
        };
        let container = mounted.container;

        swap_class(
            doc,
            container,
            &mut mounted.class_name,
            config.class_name.as_deref(),
            &[classes::OVERLAY, classes::OVERLAY_OPEN],
        )?;
        mounted
            .portal
            .set_class_name(doc, config.portal_class_name.as_deref())?;

        let backdrop_changed = match (config.has_backdrop, mounted.backdrop) {
            (true, None) => {
                let backdrop = doc.create_element("div");
                doc.add_class(backdrop, classes::OVERLAY_BACKDROP)?;
                let first = doc.children(container).first().copied();
                doc.insert_before(container, backdrop, first)?;
                mounted.backdrop = Some(backdrop);
                mounted.backdrop_class_name = None;
                true
            }
            (false, Some(backdrop)) => {
                doc.remove(backdrop)?;
                mounted.backdrop = None;
                true
            }
            _ => false,
        };
        if let Some(backdrop) = mounted.backdrop {
            swap_class(
                doc,
                backdrop,
                &mut mounted.backdrop_class_name,
                config.backdrop_class_name.as_deref(),
                &[classes::OVERLAY_BACKDROP],
            )?;
        }
        if backdrop_changed || !self.dismiss.is_attached() {
            self.dismiss.attach(doc, container, mounted.backdrop);
        }
        self.trap.set_enforce(doc, config.enforce_focus);
        Ok(())
    }

    /// Replace the content nodes with a fresh render of the children.
    ///
    /// Focus inside the content survives when an element still sits at the
    /// same tree position afterwards.
    fn render_content(&mut self, doc: &mut Document) -> Result<(), OverlayError> {
        let Some(mounted) = self.mounted.as_ref() else {
            return Ok(());
        };
        let container = mounted.container;
        let backdrop = mounted.backdrop;

        let focus_slot = doc
            .active_element()
            .filter(|active| *active != container)
            .and_then(|active| {
                doc.descendants(container)
                    .iter()
                    .position(|id| *id == active)
            });

        for node in doc.children(container).to_vec() {
            if Some(node) != backdrop {
                doc.remove(node)?;
            }
        }

        let scratch = doc.create_element("div");
        let rendered: Result<(), DomError> = self
            .children
            .iter()
            .try_for_each(|child| child.render(doc, scratch));
        for node in doc.children(scratch).to_vec() {
            if doc.is_text(node) {
                let span = doc.create_element("span");
                doc.add_class(span, classes::OVERLAY_CONTENT)?;
                doc.append_child(span, node)?;
                doc.append_child(container, span)?;
            } else {
                doc.add_class(node, classes::OVERLAY_CONTENT)?;
                doc.append_child(container, node)?;
            }
        }
        doc.remove(scratch)?;
        rendered?;

        if let Some(slot) = focus_slot {
            let restored = doc
                .descendants(container)
                .get(slot)
                .copied()
                .is_some_and(|id| doc.focus(id));
            if !restored {
                FocusTrap::focus_inside(doc, container);
            }
        }
        Ok(())
    }

    // --- Diagnostics ---

    fn absorb(&mut self, result: Result<(), OverlayError>) {
        if let Err(err) = result {
            self.record(err);
        }
    }

    fn record(&mut self, err: OverlayError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(message = "overlay.degraded", kind = err.kind(), error = %err);
        self.diagnostics.push(err);
    }
}

/// Replace the extra class `current` on `id` with `next`, re-adding `base`
/// classes in case the two overlapped.
fn swap_class(
    doc: &mut Document,
    id: ElementId,
    current: &mut Option<String>,
    next: Option<&str>,
    base: &[&str],
) -> Result<(), DomError> {
    if current.as_deref() == next {
        return Ok(());
    }
    if let Some(old) = current.take() {
        doc.remove_class(id, &old)?;
        for class in base {
            doc.add_class(id, class)?;
        }
    }
    if let Some(new) = next {
        doc.add_class(id, new)?;
        *current = Some(new.to_owned());
    }
    Ok(())
}
