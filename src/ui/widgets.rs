//! Basic UI widgets: buttons, image buttons, labels, tooltips

use macroquad::prelude::*;

use super::{display_label, id_from_str, ItemState, Rect, TextureHandle, UiContext};

/// Default explanation shown on hover over disabled buttons
pub const DEFAULT_DISABLED_REASON: &str = "Currently disabled";

/// Baseline for single-line text vertically centered in `rect`
pub(crate) fn text_baseline(rect: &Rect, font_size: f32) -> f32 {
    rect.y + (rect.h + font_size * 0.7) * 0.5
}

/// Sizing and colors of an image button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconButtonParams {
    /// Multiplied with the image colors
    pub tint: Color,
    /// Shows through where the image is transparent
    pub background: Color,
    /// Size of the image itself
    pub size: Vec2,
    /// Space between the image and the button border
    pub frame_padding: f32,
}

impl Default for IconButtonParams {
    fn default() -> Self {
        Self {
            tint: WHITE,
            background: BLACK,
            size: vec2(18.0, 18.0),
            frame_padding: 1.0,
        }
    }
}

impl IconButtonParams {
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = vec2(w, h);
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// Outline drawn around a framed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    /// Negative values draw nothing
    pub thickness: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFramedParams {
    pub frame: Option<ImageFrame>,
    pub background: Color,
    pub tint: Color,
}

impl Default for ImageFramedParams {
    fn default() -> Self {
        Self {
            frame: None,
            background: BLACK,
            tint: WHITE,
        }
    }
}

impl ImageFramedParams {
    pub fn with_frame(mut self, thickness: f32, color: Color) -> Self {
        self.frame = Some(ImageFrame { thickness, color });
        self
    }
}

/// Plain text label
pub fn text(ctx: &mut UiContext, text: &str) -> ItemState {
    let color = ctx.style.text;
    text_colored(ctx, text, color)
}

/// Text label in a specific color
pub fn text_colored(ctx: &mut UiContext, text: &str, color: Color) -> ItemState {
    let size = ctx.style.font_size;
    let rect = ctx.allocate(ctx.text_width(text), ctx.style.frame_height());
    ctx.draw_list().text(text, vec2(rect.x, text_baseline(&rect, size)), size, color);
    let id = ctx.next_id();
    ctx.register_item(id, rect)
}

/// Text in the style's warning color
pub fn warning_text(ctx: &mut UiContext, text: &str) {
    let color = ctx.style.warning;
    text_colored(ctx, text, color);
}

/// Show `text` while the previously declared widget is hovered
pub fn tooltip(ctx: &mut UiContext, text: &str) {
    if ctx.last_item().is_some_and(|item| item.hovered) {
        ctx.set_tooltip(text);
    }
}

/// A small dimmed "(?)" that explains something on hover
pub fn help_marker(ctx: &mut UiContext, text: &str) {
    let color = ctx.style.text_dim;
    text_colored(ctx, "(?)", color);
    tooltip(ctx, text);
}

/// Rect of a text button sized to its label
fn button_rect(ctx: &mut UiContext, label: &str) -> Rect {
    let pad = ctx.style.frame_padding;
    let w = (ctx.text_width(label) + pad * 4.0).round();
    ctx.allocate(w, ctx.style.frame_height())
}

/// Draw a text button, returns true on the frame it is pressed
pub fn button(ctx: &mut UiContext, label: &str) -> bool {
    button_item(ctx, label).clicked
}

/// Text button returning the full interaction state
pub(crate) fn button_item(ctx: &mut UiContext, label: &str) -> ItemState {
    let shown = display_label(label);
    let rect = button_rect(ctx, shown);
    let item = ctx.interact(id_from_str(label), rect);

    let bg = if item.held {
        ctx.style.button_active
    } else if item.hovered {
        ctx.style.button_hovered
    } else {
        ctx.style.button
    };
    let size = ctx.style.font_size;
    let pad = ctx.style.frame_padding;
    let text_color = ctx.style.text;

    let list = ctx.draw_list();
    list.rect(rect, bg);
    list.text(shown, vec2(rect.x + pad * 2.0, text_baseline(&rect, size)), size, text_color);
    item
}

/// A greyed out button that can't be clicked. `reason` is shown on hover.
pub fn button_disabled(ctx: &mut UiContext, label: &str, reason: &str) {
    let shown = display_label(label);
    let rect = button_rect(ctx, shown);
    let item = ctx.register_item(id_from_str(label), rect);

    let size = ctx.style.font_size;
    let pad = ctx.style.frame_padding;
    let bg = ctx.style.button_disabled;
    let text_color = ctx.style.text_disabled;

    let list = ctx.draw_list();
    list.rect(rect, bg);
    list.text(shown, vec2(rect.x + pad * 2.0, text_baseline(&rect, size)), size, text_color);

    if item.hovered {
        ctx.set_tooltip(reason);
    }
}

/// Buttons may share a texture, so the declaration order is mixed in
fn icon_button_id(ctx: &mut UiContext, texture: TextureHandle) -> u64 {
    id_from_str("##icon_button") ^ u64::from(texture.0) ^ ctx.next_id().rotate_left(32)
}

/// Draw the shared image-button body: frame, background, image
fn draw_image_button(ctx: &mut UiContext, rect: Rect, texture: TextureHandle, params: &IconButtonParams, frame: Color, tint: Color) {
    let inner = rect.pad(params.frame_padding.max(0.0));
    let list = ctx.draw_list();
    list.rect(rect, frame);
    list.rect(inner, params.background);
    list.image(texture, inner, tint);
}

/// A button that shows an image instead of text.
/// Returns true on the frame the button is pressed.
pub fn icon_button(ctx: &mut UiContext, texture: TextureHandle, params: IconButtonParams) -> bool {
    let pad = params.frame_padding.max(0.0);
    let rect = ctx.allocate(params.size.x + pad * 2.0, params.size.y + pad * 2.0);
    let id = icon_button_id(ctx, texture);
    let item = ctx.interact(id, rect);

    let frame = if item.held {
        ctx.style.button_active
    } else if item.hovered {
        ctx.style.button_hovered
    } else {
        ctx.style.button
    };
    draw_image_button(ctx, rect, texture, &params, frame, params.tint);
    item.clicked
}

/// Greyed out image button; `reason` is shown on hover
pub fn icon_button_disabled(ctx: &mut UiContext, texture: TextureHandle, reason: &str, params: IconButtonParams) {
    let pad = params.frame_padding.max(0.0);
    let rect = ctx.allocate(params.size.x + pad * 2.0, params.size.y + pad * 2.0);
    let id = icon_button_id(ctx, texture);
    let item = ctx.register_item(id, rect);

    let frame = ctx.style.button_disabled;
    let tint = Color::new(0.5, 0.5, 0.5, 0.6);
    draw_image_button(ctx, rect, texture, &params, frame, tint);

    if item.hovered {
        ctx.set_tooltip(reason);
    }
}

/// Display an image with an optional outline around it
pub fn image_framed(ctx: &mut UiContext, texture: TextureHandle, size: Vec2, params: ImageFramedParams) {
    let rect = ctx.allocate(size.x, size.y);
    let id = ctx.next_id();
    ctx.register_item(id, rect);

    let list = ctx.draw_list();
    list.rect(rect, params.background);
    list.image(texture, rect, params.tint);
    if let Some(frame) = params.frame {
        if frame.thickness >= 0.0 {
            list.rect_lines(rect, frame.thickness, frame.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::*;
    use crate::ui::{DrawCmd, NullPainter};

    fn frame_cmds(ctx: &UiContext) -> Vec<DrawCmd> {
        ctx.commands().cloned().collect()
    }

    #[test]
    fn test_button_clicked_only_on_press() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(press(5.0, 5.0), AREA);
        assert!(button(&mut ctx, "Go"));

        ctx.begin_frame(hold(5.0, 5.0), AREA);
        assert!(!button(&mut ctx, "Go"));

        ctx.begin_frame(hover(5.0, 5.0), AREA);
        assert!(!button(&mut ctx, "Go"));
    }

    #[test]
    fn test_button_hides_id_suffix() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(hover(500.0, 500.0), AREA);
        button(&mut ctx, "Save##toolbar");
        let has_label = ctx
            .commands()
            .any(|cmd| matches!(cmd, DrawCmd::Text { text, .. } if text == "Save"));
        assert!(has_label);
    }

    #[test]
    fn test_disabled_button_ignores_clicks_and_explains() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(press(5.0, 5.0), AREA);
        button_disabled(&mut ctx, "Export", "Nothing to export");
        assert!(ctx.dragging.is_none());
        let item = ctx.last_item().unwrap();
        assert!(item.hovered && !item.clicked);

        ctx.end_frame(&mut NullPainter);
        let tip = ctx
            .commands()
            .any(|cmd| matches!(cmd, DrawCmd::Text { text, .. } if text == "Nothing to export"));
        assert!(tip);
    }

    #[test]
    fn test_icon_button_press_transition() {
        let mut ctx = UiContext::new();
        let tex = TextureHandle(4);

        ctx.begin_frame(hover(5.0, 5.0), AREA);
        assert!(!icon_button(&mut ctx, tex, IconButtonParams::default()));

        ctx.begin_frame(press(5.0, 5.0), AREA);
        assert!(icon_button(&mut ctx, tex, IconButtonParams::default()));

        ctx.begin_frame(hold(5.0, 5.0), AREA);
        assert!(!icon_button(&mut ctx, tex, IconButtonParams::default()));
    }

    #[test]
    fn test_icon_buttons_sharing_a_texture() {
        let mut ctx = UiContext::new();
        let tex = TextureHandle(4);
        let frame = |ctx: &mut UiContext, input: crate::ui::FrameInput| {
            ctx.begin_frame(input, AREA);
            let first = icon_button(ctx, tex, IconButtonParams::default());
            ctx.same_line();
            let second = icon_button(ctx, tex, IconButtonParams::default());
            (first, second)
        };

        assert_eq!(frame(&mut ctx, press(5.0, 5.0)), (true, false));

        // Holding the first one leaves the second one idle
        frame(&mut ctx, hold(5.0, 5.0));
        let active = ctx.style.button_active;
        let held = frame_cmds(&ctx)
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { color, .. } if *color == active))
            .count();
        assert_eq!(held, 1);
    }

    #[test]
    fn test_icon_button_draws_tinted_image_inside_padding() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(hover(500.0, 500.0), AREA);
        let params = IconButtonParams::default().with_tint(RED);
        icon_button(&mut ctx, TextureHandle(9), params);

        let cmds = frame_cmds(&ctx);
        assert_eq!(cmds.len(), 3);
        assert_eq!(
            cmds[1],
            DrawCmd::Rect { rect: Rect::new(1.0, 1.0, 18.0, 18.0), color: BLACK }
        );
        assert_eq!(
            cmds[2],
            DrawCmd::Image { texture: TextureHandle(9), rect: Rect::new(1.0, 1.0, 18.0, 18.0), tint: RED }
        );
    }

    #[test]
    fn test_icon_button_disabled_never_clicks() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(press(5.0, 5.0), AREA);
        icon_button_disabled(&mut ctx, TextureHandle(1), DEFAULT_DISABLED_REASON, IconButtonParams::default());
        assert!(ctx.dragging.is_none());
        assert!(!ctx.last_item().unwrap().clicked);
    }

    #[test]
    fn test_image_framed_frame_only_when_requested() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(hover(0.0, 0.0), AREA);
        image_framed(&mut ctx, TextureHandle(2), vec2(32.0, 32.0), ImageFramedParams::default());
        assert!(!ctx.commands().any(|c| matches!(c, DrawCmd::RectLines { .. })));

        ctx.begin_frame(hover(0.0, 0.0), AREA);
        image_framed(&mut ctx, TextureHandle(2), vec2(32.0, 32.0), ImageFramedParams::default().with_frame(-1.0, RED));
        assert!(!ctx.commands().any(|c| matches!(c, DrawCmd::RectLines { .. })));

        ctx.begin_frame(hover(0.0, 0.0), AREA);
        image_framed(&mut ctx, TextureHandle(2), vec2(32.0, 32.0), ImageFramedParams::default().with_frame(2.0, RED));
        let last = frame_cmds(&ctx).pop();
        assert_eq!(
            last,
            Some(DrawCmd::RectLines { rect: Rect::new(0.0, 0.0, 32.0, 32.0), thickness: 2.0, color: RED })
        );
    }

    #[test]
    fn test_display_widgets_are_repeatable() {
        let draw = |ctx: &mut UiContext| {
            ctx.begin_frame(hover(3.0, 3.0), AREA);
            image_framed(ctx, TextureHandle(2), vec2(16.0, 16.0), ImageFramedParams::default().with_frame(1.0, WHITE));
            warning_text(ctx, "Careful");
            help_marker(ctx, "Explains things");
            ctx.end_frame(&mut NullPainter);
            frame_cmds(ctx)
        };

        let mut ctx = UiContext::new();
        let first = draw(&mut ctx);
        let second = draw(&mut ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_warning_text_uses_warning_color() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(hover(0.0, 0.0), AREA);
        warning_text(&mut ctx, "Shader failed");
        let warning = ctx.style.warning;
        assert!(ctx
            .commands()
            .any(|c| matches!(c, DrawCmd::Text { text, color, .. } if text == "Shader failed" && *color == warning)));
    }

    #[test]
    fn test_tooltip_follows_previous_item() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(hover(500.0, 500.0), AREA);
        button(&mut ctx, "Far");
        tooltip(&mut ctx, "not shown");
        ctx.end_frame(&mut NullPainter);
        assert!(!ctx.commands().any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "not shown")));

        ctx.begin_frame(hover(5.0, 5.0), AREA);
        button(&mut ctx, "Near");
        tooltip(&mut ctx, "shown");
        ctx.end_frame(&mut NullPainter);
        assert!(ctx.commands().any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "shown")));
    }
}
