//! Immediate-mode helper widgets for macroquad applications
//!
//! ```ignore
//! let mut ctx = UiContext::new();
//! let mut painter = MacroquadPainter::new();
//! loop {
//!     ctx.begin_frame(FrameInput::from_macroquad(), Rect::screen(screen_width(), screen_height()));
//!     if angle_wheel(&mut ctx, "Hue shift", &mut hue, AngleWheelParams::default()) {
//!         recolor(hue);
//!     }
//!     time_formatted_hms(&mut ctx, position, duration);
//!     ctx.end_frame(&mut painter);
//!     next_frame().await;
//! }
//! ```

pub mod ui;

pub use ui::*;
