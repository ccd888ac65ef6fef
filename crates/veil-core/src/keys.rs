#![forbid(unsafe_code)]

//! Numeric keycode table (`KeyboardEvent.which` values).

pub const BACKSPACE: u32 = 8;
pub const TAB: u32 = 9;
pub const ENTER: u32 = 13;
pub const SHIFT: u32 = 16;
pub const ESCAPE: u32 = 27;
pub const SPACE: u32 = 32;
pub const END: u32 = 35;
pub const HOME: u32 = 36;
pub const ARROW_LEFT: u32 = 37;
pub const ARROW_UP: u32 = 38;
pub const ARROW_RIGHT: u32 = 39;
pub const ARROW_DOWN: u32 = 40;
pub const DELETE: u32 = 46;
