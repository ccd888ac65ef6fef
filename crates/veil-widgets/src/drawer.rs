#![forbid(unsafe_code)]

//! Edge-anchored panel built on [`Overlay`].
//!
//! The drawer adds chrome (header with icon, title and close button, body
//! and footer blocks) and hands everything else to the overlay unchanged.
//! Its close button calls the same `on_close` the overlay uses for Escape
//! and outside clicks, with [`CloseReason::CloseButton`].
//!
//! # Rendered structure
//!
//! ```text
//! div.veil-drawer.veil-drawer-position-<edge>[.class_name]
//! ├── div.veil-drawer-header              (when a title is set)
//! │   ├── span.veil-icon                  (when an icon is set)
//! │   ├── h4.veil-heading
//! │   └── button.veil-drawer-close        (when the close button is shown)
//! ├── div.veil-drawer-body                (when `body` content is set)
//! ├── <children>                          (as given)
//! └── div.veil-drawer-footer              (when `footer` content is set)
//!     └── div.veil-drawer-footer-actions
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use veil_core::event::Event;
use veil_core::{Document, DomError, ElementId};

use crate::button::Button;
use crate::heading::Heading;
use crate::icon::{Icon, IconSize};
use crate::overlay::{CloseReason, Overlay, OverlayConfig, TransitionPhase};
use crate::{Child, EventResult, Widget, child, classes};

/// Icon used by the close button.
pub const CLOSE_ICON: &str = "small-cross";

/// Edge the drawer slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawerPosition {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl DrawerPosition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Whether the drawer spans the viewport width (sized by height).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Extent of the drawer along its sliding axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawerSize {
    /// 360px.
    Small,
    /// 50%.
    #[default]
    Standard,
    /// 90%.
    Large,
    /// Any CSS length.
    Custom(String),
}

impl DrawerSize {
    /// CSS length for the size.
    pub fn css_value(&self) -> &str {
        match self {
            Self::Small => "360px",
            Self::Standard => "50%",
            Self::Large => "90%",
            Self::Custom(value) => value,
        }
    }

    /// Value of the `data-size` attribute.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Standard => "standard",
            Self::Large => "large",
            Self::Custom(_) => "custom",
        }
    }
}

/// Drawer props: overlay configuration plus presentation.
#[derive(Clone, Debug)]
pub struct DrawerProps {
    pub overlay: OverlayConfig,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub is_close_button_shown: bool,
    pub class_name: Option<String>,
    pub position: DrawerPosition,
    pub size: DrawerSize,
    pub body: Vec<Child>,
    pub footer: Vec<Child>,
    pub children: Vec<Child>,
}

impl Default for DrawerProps {
    fn default() -> Self {
        Self {
            overlay: OverlayConfig::default(),
            title: None,
            icon: None,
            is_close_button_shown: true,
            class_name: None,
            position: DrawerPosition::default(),
            size: DrawerSize::default(),
            body: Vec::new(),
            footer: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl DrawerProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole overlay configuration.
    pub fn overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_close_button_shown(mut self, shown: bool) -> Self {
        self.is_close_button_shown = shown;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn position(mut self, position: DrawerPosition) -> Self {
        self.position = position;
        self
    }

    pub fn size(mut self, size: DrawerSize) -> Self {
        self.size = size;
        self
    }

    /// Content wrapped in `div.veil-drawer-body`.
    pub fn body(mut self, widget: impl Widget + 'static) -> Self {
        self.body.push(child(widget));
        self
    }

    /// Content wrapped in the footer actions row.
    pub fn footer(mut self, widget: impl Widget + 'static) -> Self {
        self.footer.push(child(widget));
        self
    }

    /// Free content, rendered as-is.
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(child(widget));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Child>) -> Self {
        self.children.extend(children);
        self
    }

    // --- Overlay pass-through ---

    pub fn is_open(mut self, open: bool) -> Self {
        self.overlay.is_open = open;
        self
    }

    pub fn use_portal(mut self, use_portal: bool) -> Self {
        self.overlay.use_portal = use_portal;
        self
    }

    pub fn portal_container(mut self, container: ElementId) -> Self {
        self.overlay.portal_container = Some(container);
        self
    }

    pub fn portal_class_name(mut self, class: impl Into<String>) -> Self {
        self.overlay.portal_class_name = Some(class.into());
        self
    }

    pub fn has_backdrop(mut self, has_backdrop: bool) -> Self {
        self.overlay.has_backdrop = has_backdrop;
        self
    }

    pub fn backdrop_class_name(mut self, class: impl Into<String>) -> Self {
        self.overlay.backdrop_class_name = Some(class.into());
        self
    }

    pub fn can_outside_click_close(mut self, close: bool) -> Self {
        self.overlay.can_outside_click_close = close;
        self
    }

    pub fn can_escape_key_close(mut self, close: bool) -> Self {
        self.overlay.can_escape_key_close = close;
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.overlay.auto_focus = auto_focus;
        self
    }

    pub fn enforce_focus(mut self, enforce_focus: bool) -> Self {
        self.overlay.enforce_focus = enforce_focus;
        self
    }

    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.overlay.transition_duration = duration;
        self
    }

    pub fn on_opening(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.overlay = self.overlay.on_opening(f);
        self
    }

    pub fn on_opened(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.overlay = self.overlay.on_opened(f);
        self
    }

    pub fn on_closing(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.overlay = self.overlay.on_closing(f);
        self
    }

    pub fn on_closed(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.overlay = self.overlay.on_closed(f);
        self
    }

    pub fn on_close(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.overlay = self.overlay.on_close(f);
        self
    }
}

/// Element ids written back by [`DrawerPanel`] while rendering.
#[derive(Debug, Clone, Default)]
struct PanelSlots {
    panel: Rc<Cell<Option<ElementId>>>,
    close_button: Rc<Cell<Option<ElementId>>>,
}

/// The drawer chrome, rendered as the overlay's content.
struct DrawerPanel {
    title: Option<String>,
    icon: Option<String>,
    is_close_button_shown: bool,
    class_name: Option<String>,
    position: DrawerPosition,
    size: DrawerSize,
    body: Vec<Child>,
    footer: Vec<Child>,
    children: Vec<Child>,
    slots: PanelSlots,
}

impl DrawerPanel {
    fn render_header(&self, doc: &mut Document, panel: ElementId, title: &str) -> Result<(), DomError> {
        let header = doc.create_element("div");
        doc.add_class(header, classes::DRAWER_HEADER)?;
        doc.append_child(panel, header)?;
        if let Some(icon) = &self.icon {
            Icon::new(icon.as_str())
                .size(IconSize::Large)
                .build(doc, header)?;
        }
        Heading::h4(title).render(doc, header)?;
        if self.is_close_button_shown {
            let button = Button::new()
                .icon(CLOSE_ICON)
                .minimal(true)
                .class(classes::DRAWER_CLOSE)
                .aria_label("Close")
                .build(doc, header)?;
            self.slots.close_button.set(Some(button));
        }
        Ok(())
    }
}

impl Widget for DrawerPanel {
    fn render(&self, doc: &mut Document, parent: ElementId) -> Result<(), DomError> {
        self.slots.close_button.set(None);

        let panel = doc.create_element("div");
        doc.add_class(panel, classes::DRAWER)?;
        doc.add_class(panel, &classes::drawer_position_class(self.position.as_str()))?;
        if let Some(class) = &self.class_name {
            doc.add_class(panel, class)?;
        }
        let axis = if self.position.is_vertical() {
            "height"
        } else {
            "width"
        };
        doc.set_attribute(panel, "style", format!("{axis}: {};", self.size.css_value()))?;
        doc.set_attribute(panel, "data-size", self.size.label())?;
        doc.append_child(parent, panel)?;
        self.slots.panel.set(Some(panel));

        match (&self.title, &self.icon) {
            (Some(title), _) => self.render_header(doc, panel, title)?,
            (None, Some(_icon)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(message = "drawer.icon_without_title", icon = %_icon);
            }
            (None, None) => {}
        }

        if !self.body.is_empty() {
            let body = doc.create_element("div");
            doc.add_class(body, classes::DRAWER_BODY)?;
            doc.append_child(panel, body)?;
            self.body.render(doc, body)?;
        }

        self.children.render(doc, panel)?;

        if !self.footer.is_empty() {
            let footer = doc.create_element("div");
            doc.add_class(footer, classes::DRAWER_FOOTER)?;
            doc.append_child(panel, footer)?;
            let actions = doc.create_element("div");
            doc.add_class(actions, classes::DRAWER_FOOTER_ACTIONS)?;
            doc.append_child(footer, actions)?;
            self.footer.render(doc, actions)?;
        }
        Ok(())
    }
}

/// Drawer component. Owns its [`Overlay`] across renders.
#[derive(Debug, Default)]
pub struct Drawer {
    overlay: Overlay,
    slots: PanelSlots,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render with fresh props. `host` receives inline content.
    pub fn render(&mut self, doc: &mut Document, host: ElementId, props: DrawerProps) {
        let DrawerProps {
            overlay,
            title,
            icon,
            is_close_button_shown,
            class_name,
            position,
            size,
            body,
            footer,
            children,
        } = props;

        let panel = DrawerPanel {
            title,
            icon,
            is_close_button_shown,
            class_name,
            position,
            size,
            body,
            footer,
            children,
            slots: self.slots.clone(),
        };
        let config = OverlayConfig {
            class_name: Some(classes::OVERLAY_CONTAINER.to_owned()),
            ..overlay
        };
        self.overlay.render(doc, host, config, &[child(panel)]);
        self.forget_unmounted();
    }

    /// Advance transition timers.
    pub fn tick(&mut self, doc: &mut Document, dt: Duration) {
        self.overlay.tick(doc, dt);
        self.forget_unmounted();
    }

    /// Route an input event: close-button clicks first, then the overlay.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> EventResult {
        if let Some(button) = self.slots.close_button.get()
            && Button::is_click(doc, button, event)
        {
            self.overlay.request_close(CloseReason::CloseButton);
            return EventResult::Consumed;
        }
        self.overlay.handle_event(doc, event)
    }

    /// Tear down immediately without lifecycle callbacks.
    pub fn unmount(&mut self, doc: &mut Document) {
        self.overlay.unmount(doc);
        self.forget_unmounted();
    }

    pub fn phase(&self) -> TransitionPhase {
        self.overlay.phase()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The `div.veil-drawer` element while mounted.
    pub fn element(&self) -> Option<ElementId> {
        self.slots.panel.get()
    }

    /// The header close button while mounted and shown.
    pub fn close_button(&self) -> Option<ElementId> {
        self.slots.close_button.get()
    }

    fn forget_unmounted(&self) {
        if !self.overlay.is_mounted() {
            self.slots.panel.set(None);
            self.slots.close_button.set(None);
        }
    }
}
