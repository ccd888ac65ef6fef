#![forbid(unsafe_code)]

//! Overlay configuration.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use veil_core::ElementId;

use super::dismiss::DismissFlags;
use super::transition::DEFAULT_TRANSITION_DURATION;

/// Lifecycle callback; receives the overlay container element.
pub type LifecycleCallback = Rc<dyn Fn(ElementId)>;

/// Dismissal callback; receives what triggered the close request.
pub type CloseCallback = Rc<dyn Fn(CloseReason)>;

/// Why the overlay asked its owner to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum CloseReason {
    /// Escape pressed inside the overlay.
    EscapeKey,
    /// Pointer-down on the backdrop (or outside the content when there is
    /// no backdrop).
    OutsideClick,
    /// A close button rendered by a host widget was clicked.
    CloseButton,
}

/// Per-render overlay configuration.
///
/// Built fresh by the owner on every render and handed to
/// [`Overlay::render`](super::Overlay::render).
#[derive(Clone)]
pub struct OverlayConfig {
    pub is_open: bool,
    pub use_portal: bool,
    pub portal_container: Option<ElementId>,
    pub portal_class_name: Option<String>,
    pub class_name: Option<String>,
    pub has_backdrop: bool,
    pub backdrop_class_name: Option<String>,
    pub can_outside_click_close: bool,
    pub can_escape_key_close: bool,
    pub auto_focus: bool,
    pub enforce_focus: bool,
    pub transition_duration: Duration,
    pub on_opening: Option<LifecycleCallback>,
    pub on_opened: Option<LifecycleCallback>,
    pub on_closing: Option<LifecycleCallback>,
    pub on_closed: Option<LifecycleCallback>,
    pub on_close: Option<CloseCallback>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            is_open: false,
            use_portal: true,
            portal_container: None,
            portal_class_name: None,
            class_name: None,
            has_backdrop: true,
            backdrop_class_name: None,
            can_outside_click_close: true,
            can_escape_key_close: true,
            auto_focus: true,
            enforce_focus: true,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            on_opening: None,
            on_opened: None,
            on_closing: None,
            on_closed: None,
            on_close: None,
        }
    }
}

impl fmt::Debug for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayConfig")
            .field("is_open", &self.is_open)
            .field("use_portal", &self.use_portal)
            .field("portal_container", &self.portal_container)
            .field("portal_class_name", &self.portal_class_name)
            .field("class_name", &self.class_name)
            .field("has_backdrop", &self.has_backdrop)
            .field("can_outside_click_close", &self.can_outside_click_close)
            .field("can_escape_key_close", &self.can_escape_key_close)
            .field("auto_focus", &self.auto_focus)
            .field("enforce_focus", &self.enforce_focus)
            .field("transition_duration", &self.transition_duration)
            .field("on_close", &self.on_close.is_some())
            .finish_non_exhaustive()
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(mut self, open: bool) -> Self {
        self.is_open = open;
        self
    }

    pub fn use_portal(mut self, use_portal: bool) -> Self {
        self.use_portal = use_portal;
        self
    }

    pub fn portal_container(mut self, container: ElementId) -> Self {
        self.portal_container = Some(container);
        self
    }

    pub fn portal_class_name(mut self, class: impl Into<String>) -> Self {
        self.portal_class_name = Some(class.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn has_backdrop(mut self, has_backdrop: bool) -> Self {
        self.has_backdrop = has_backdrop;
        self
    }

    pub fn backdrop_class_name(mut self, class: impl Into<String>) -> Self {
        self.backdrop_class_name = Some(class.into());
        self
    }

    pub fn can_outside_click_close(mut self, close: bool) -> Self {
        self.can_outside_click_close = close;
        self
    }

    pub fn can_escape_key_close(mut self, close: bool) -> Self {
        self.can_escape_key_close = close;
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn enforce_focus(mut self, enforce_focus: bool) -> Self {
        self.enforce_focus = enforce_focus;
        self
    }

    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn transition_duration_ms(self, ms: u64) -> Self {
        self.transition_duration(Duration::from_millis(ms))
    }

    pub fn on_opening(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.on_opening = Some(Rc::new(f));
        self
    }

    pub fn on_opened(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.on_opened = Some(Rc::new(f));
        self
    }

    pub fn on_closing(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.on_closing = Some(Rc::new(f));
        self
    }

    pub fn on_closed(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.on_closed = Some(Rc::new(f));
        self
    }

    pub fn on_close(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.on_close = Some(Rc::new(f));
        self
    }

    /// Dismissal inputs that are allowed to call `on_close`.
    pub fn dismiss_flags(&self) -> DismissFlags {
        let mut flags = DismissFlags::empty();
        flags.set(DismissFlags::ESCAPE_KEY, self.can_escape_key_close);
        flags.set(DismissFlags::OUTSIDE_CLICK, self.can_outside_click_close);
        flags
    }
}
