#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Every event is addressed to a target element in a
//! [`Document`](crate::dom::Document). Components decide whether an event
//! concerns them by checking the target against the scope of a listener
//! they registered (see [`crate::listener`]).
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when not specified
//! - `Modifiers` use bitflags for easy combination
//! - Pointer "click" is modelled as its own kind so presentational
//!   primitives can forward clicks without tracking down/up pairs

use bitflags::bitflags;

use crate::dom::ElementId;
use crate::keys;
use crate::listener::ListenerKind;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse/touch) event.
    Pointer(PointerEvent),

    /// Focus moved onto the target element.
    Focus(FocusEvent),
}

impl Event {
    /// The element the event was dispatched to.
    #[must_use]
    pub const fn target(&self) -> ElementId {
        match self {
            Self::Key(key) => key.target,
            Self::Pointer(pointer) => pointer.target,
            Self::Focus(focus) => focus.target,
        }
    }

    /// The listener kind that observes this event.
    #[must_use]
    pub const fn listener_kind(&self) -> ListenerKind {
        match self {
            Self::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            }) => ListenerKind::KeyUp,
            Self::Key(_) => ListenerKind::KeyDown,
            Self::Pointer(PointerEvent {
                kind: PointerEventKind::Down(_),
                ..
            }) => ListenerKind::PointerDown,
            Self::Pointer(PointerEvent {
                kind: PointerEventKind::Up(_),
                ..
            }) => ListenerKind::PointerUp,
            Self::Pointer(PointerEvent {
                kind: PointerEventKind::Click(_),
                ..
            }) => ListenerKind::Click,
            Self::Focus(_) => ListenerKind::Focus,
        }
    }

    /// Shorthand for an Escape key press on `target`.
    #[must_use]
    pub const fn escape(target: ElementId) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Escape, target))
    }

    /// Shorthand for a primary-button pointer-down on `target`.
    #[must_use]
    pub const fn pointer_down(target: ElementId) -> Self {
        Self::Pointer(PointerEvent::new(
            PointerEventKind::Down(MouseButton::Left),
            target,
        ))
    }

    /// Shorthand for a primary-button click on `target`.
    #[must_use]
    pub const fn click(target: ElementId) -> Self {
        Self::Pointer(PointerEvent::new(
            PointerEventKind::Click(MouseButton::Left),
            target,
        ))
    }

    /// Shorthand for focus landing on `target`.
    #[must_use]
    pub const fn focus(target: ElementId) -> Self {
        Self::Focus(FocusEvent { target })
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,

    /// Element that had focus when the key was pressed.
    pub target: ElementId,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode, target: ElementId) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
            target,
        }
    }

    /// Create a key event from a numeric keycode (`which`).
    ///
    /// Unknown codes map to [`KeyCode::Other`].
    #[must_use]
    pub const fn from_which(which: u32, target: ElementId) -> Self {
        Self::new(KeyCode::from_which(which), target)
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if this is a press (or auto-repeat) of `code`.
    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.code == code && !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Any keycode without a dedicated variant.
    Other(u32),
}

impl KeyCode {
    /// Map a numeric keycode (`which`) onto a [`KeyCode`].
    #[must_use]
    pub const fn from_which(which: u32) -> Self {
        match which {
            keys::ESCAPE => Self::Escape,
            keys::ENTER => Self::Enter,
            keys::TAB => Self::Tab,
            keys::BACKSPACE => Self::Backspace,
            keys::DELETE => Self::Delete,
            keys::SPACE => Self::Char(' '),
            keys::HOME => Self::Home,
            keys::END => Self::End,
            keys::ARROW_UP => Self::Up,
            keys::ARROW_DOWN => Self::Down,
            keys::ARROW_LEFT => Self::Left,
            keys::ARROW_RIGHT => Self::Right,
            other => Self::Other(other),
        }
    }

    /// The numeric keycode for this key, if it has one.
    #[must_use]
    pub const fn which(self) -> Option<u32> {
        match self {
            Self::Escape => Some(keys::ESCAPE),
            Self::Enter => Some(keys::ENTER),
            Self::Tab | Self::BackTab => Some(keys::TAB),
            Self::Backspace => Some(keys::BACKSPACE),
            Self::Delete => Some(keys::DELETE),
            Self::Char(' ') => Some(keys::SPACE),
            Self::Home => Some(keys::HOME),
            Self::End => Some(keys::END),
            Self::Up => Some(keys::ARROW_UP),
            Self::Down => Some(keys::ARROW_DOWN),
            Self::Left => Some(keys::ARROW_LEFT),
            Self::Right => Some(keys::ARROW_RIGHT),
            Self::Other(code) => Some(code),
            Self::Char(_) => None,
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Element under the pointer.
    pub target: ElementId,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(MouseButton),

    /// Button released.
    Up(MouseButton),

    /// Full press/release on the same element.
    Click(MouseButton),
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Focus landed on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    /// Element that received focus.
    pub target: ElementId,
}
