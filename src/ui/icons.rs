//! Lucide icon support
//!
//! Glyphs are rendered with the Lucide icon font when the painter has one
//! loaded. Without it, widgets fall back to a short text label.

/// Lucide icon codepoints
pub mod icon {
    pub const FOLDER_OPEN: char = '\u{e247}';
    pub const FILE: char = '\u{e0c0}';
}

/// Baseline origin that centers a square glyph of `size` in `rect`
///
/// Icon fonts have square glyphs where width ≈ height ≈ font size, and text is
/// drawn from its baseline, so y is the rect center plus half the glyph height.
pub fn glyph_origin(rect: &super::Rect, size: f32) -> (f32, f32) {
    let x = rect.x + (rect.w - size) * 0.5;
    let y = rect.y + (rect.h + size) * 0.5;
    // Round to integer pixels to avoid blurry subpixel rendering
    (x.round(), y.round())
}
