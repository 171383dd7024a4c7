//! Draw commands and the painter seam
//!
//! Widgets never call macroquad's draw functions directly. They record
//! `DrawCmd`s into the frame's `DrawList`, and `UiContext::end_frame` hands
//! them to a `Painter`. This keeps every widget usable (and testable) without
//! a live window.

use std::collections::HashMap;

use macroquad::prelude::*;

use super::Rect;

/// Opaque, non-owning identifier of a GPU image owned by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

impl From<u32> for TextureHandle {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A single primitive recorded by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect { rect: Rect, color: Color },
    RectLines { rect: Rect, thickness: f32, color: Color },
    Line { from: Vec2, to: Vec2, thickness: f32, color: Color },
    /// Circle outline approximated by a polygon with `segments` sides
    CircleLines { center: Vec2, radius: f32, segments: u8, thickness: f32, color: Color },
    /// Text with its baseline at `pos.y`
    Text { text: String, pos: Vec2, size: f32, color: Color },
    /// Icon-font glyph centered in `rect`
    Glyph { glyph: char, rect: Rect, size: f32, color: Color },
    Image { texture: TextureHandle, rect: Rect, tint: Color },
}

/// Ordered list of primitives for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    /// Insert at a previously recorded position (used to put popup backgrounds
    /// underneath their already recorded content)
    pub fn insert(&mut self, index: usize, cmd: DrawCmd) {
        let index = index.min(self.cmds.len());
        self.cmds.insert(index, cmd);
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect { rect, color });
    }

    pub fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.push(DrawCmd::RectLines { rect, thickness, color });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.push(DrawCmd::Line { from, to, thickness, color });
    }

    pub fn circle_lines(&mut self, center: Vec2, radius: f32, segments: u8, thickness: f32, color: Color) {
        self.push(DrawCmd::CircleLines { center, radius, segments, thickness, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color) {
        self.push(DrawCmd::Text { text: text.into(), pos, size, color });
    }

    pub fn glyph(&mut self, glyph: char, rect: Rect, size: f32, color: Color) {
        self.push(DrawCmd::Glyph { glyph, rect, size, color });
    }

    pub fn image(&mut self, texture: TextureHandle, rect: Rect, tint: Color) {
        self.push(DrawCmd::Image { texture, rect, tint });
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }
}

/// Rendering backend for recorded draw commands
pub trait Painter {
    fn paint(&mut self, cmd: &DrawCmd);

    fn paint_list(&mut self, list: &DrawList) {
        for cmd in list.iter() {
            self.paint(cmd);
        }
    }
}

/// Painter that discards everything (headless frames)
pub struct NullPainter;

impl Painter for NullPainter {
    fn paint(&mut self, _cmd: &DrawCmd) {}
}

/// Painter backed by macroquad's immediate draw calls
///
/// The texture table only maps handles to textures the application gave it.
/// Removing or replacing entries is up to the application.
#[derive(Default)]
pub struct MacroquadPainter {
    textures: HashMap<TextureHandle, Texture2D>,
    next_handle: u32,
    pub icon_font: Option<Font>,
    pub text_font: Option<Font>,
}

impl MacroquadPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under a fresh handle
    pub fn add_texture(&mut self, texture: Texture2D) -> TextureHandle {
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.textures.insert(handle, texture);
        handle
    }

    /// Register a texture under a caller-chosen handle
    pub fn set_texture(&mut self, handle: TextureHandle, texture: Texture2D) {
        self.next_handle = self.next_handle.max(handle.0);
        self.textures.insert(handle, texture);
    }

    pub fn remove_texture(&mut self, handle: TextureHandle) -> Option<Texture2D> {
        self.textures.remove(&handle)
    }
}

impl Painter for MacroquadPainter {
    fn paint(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Rect { rect, color } => {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, *color);
            }
            DrawCmd::RectLines { rect, thickness, color } => {
                if *thickness > 0.0 {
                    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, *thickness, *color);
                }
            }
            DrawCmd::Line { from, to, thickness, color } => {
                draw_line(from.x, from.y, to.x, to.y, *thickness, *color);
            }
            DrawCmd::CircleLines { center, radius, segments, thickness, color } => {
                draw_poly_lines(center.x, center.y, *segments, *radius, 0.0, *thickness, *color);
            }
            DrawCmd::Text { text, pos, size, color } => {
                // Round to integer pixels for crisp rendering
                draw_text_ex(
                    text,
                    pos.x.round(),
                    pos.y.round(),
                    TextParams {
                        font: self.text_font.as_ref(),
                        font_size: *size as u16,
                        color: *color,
                        ..Default::default()
                    },
                );
            }
            DrawCmd::Glyph { glyph, rect, size, color } => {
                let (x, y) = super::glyph_origin(rect, *size);
                draw_text_ex(
                    &glyph.to_string(),
                    x,
                    y,
                    TextParams {
                        font: self.icon_font.as_ref(),
                        font_size: *size as u16,
                        color: *color,
                        ..Default::default()
                    },
                );
            }
            DrawCmd::Image { texture, rect, tint } => match self.textures.get(texture) {
                Some(tex) => draw_texture_ex(
                    tex,
                    rect.x,
                    rect.y,
                    *tint,
                    DrawTextureParams {
                        dest_size: Some(Vec2::new(rect.w, rect.h)),
                        ..Default::default()
                    },
                ),
                None => log::warn!("No texture registered for {:?}", texture),
            },
        }
    }
}
