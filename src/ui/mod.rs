//! Immediate-mode helper widgets
//!
//! Small widgets layered on a minimal immediate-mode core:
//! - angle wheels and a 3D direction picker
//! - image buttons, disabled buttons, framed images
//! - file/folder dialog buttons
//! - HMS time text, warning text, help markers and tooltips
//! - context menus from buttons or from any previous item
//!
//! Design principles:
//! - Immediate mode (widgets are re-declared each frame)
//! - Caller-owned values are borrowed for one call, never kept
//! - Widgets record draw commands; a `Painter` (macroquad) renders them

mod rect;
mod input;
mod draw;
mod theme;
mod icons;
mod widgets;
mod angle;
mod time;
mod text_input;
mod popup;
mod dialog;

pub use rect::*;
pub use input::*;
pub use draw::*;
pub use theme::*;
pub use icons::*;
pub use widgets::*;
pub use angle::*;
pub use time::*;
pub use text_input::*;
pub use popup::*;
pub use dialog::*;

pub(crate) use input::EditState;
#[cfg(test)]
pub(crate) use input::test_support;
