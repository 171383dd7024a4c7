//! Widget gallery: every helper widget in one macroquad window

use std::f32::consts::FRAC_PI_4;
use std::path::Path;

use macroquad::prelude::{
    clear_background, get_frame_time, load_ttf_font, measure_text, next_frame, screen_height, screen_width, vec2,
    Conf, FilterMode, Texture2D,
};
use widget_helpers::*;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const STYLE_PATH: &str = "style.ron";
const ICON_FONT_PATH: &str = "assets/fonts/lucide.ttf";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Widget Helpers v{}", VERSION),
        window_width: 900,
        window_height: 700,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Everything the gallery binds to its widgets
struct Gallery {
    angle: f32,
    azimuth: f32,
    inclination: f32,
    count: u32,
    folder: String,
    file: String,
    playhead: f32,
    clip_length: f32,
    last_action: String,
}

impl Gallery {
    fn new() -> Self {
        Self {
            angle: FRAC_PI_4,
            azimuth: 0.0,
            inclination: 1.0,
            count: 3,
            folder: String::new(),
            file: String::new(),
            playhead: 0.0,
            clip_length: 3725.0,
            last_action: "(nothing yet)".to_string(),
        }
    }
}

/// 16x16 checkerboard so image widgets have something to show
fn checker_texture() -> Texture2D {
    let mut pixels = Vec::with_capacity(16 * 16 * 4);
    for y in 0..16 {
        for x in 0..16 {
            let light = ((x / 4) + (y / 4)) % 2 == 0;
            let v = if light { 220 } else { 60 };
            pixels.extend_from_slice(&[v, v / 2 + 60, 255 - v, 255]);
        }
    }
    let tex = Texture2D::from_rgba8(16, 16, &pixels);
    tex.set_filter(FilterMode::Nearest);
    tex
}

fn load_style() -> Style {
    if !Path::new(STYLE_PATH).exists() {
        return Style::default();
    }
    match Style::load(STYLE_PATH) {
        Ok(style) => {
            log::info!("Loaded style from {}", STYLE_PATH);
            style
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}, using default style", STYLE_PATH, e);
            Style::default()
        }
    }
}

fn draw_gallery(ctx: &mut UiContext, g: &mut Gallery, image: TextureHandle) {
    text(ctx, "Angles");
    if angle_wheel(ctx, "Rotation", &mut g.angle, AngleWheelParams::default()) {
        g.last_action = format!("rotation = {:.3} rad", g.angle);
    }
    tooltip(ctx, "Drag on the wheel. 0 points right, counter-clockwise is positive");
    if direction_3d(ctx, "Light direction", &mut g.azimuth, &mut g.inclination) {
        g.last_action = format!("direction = {:?}", direction_from_angles(g.azimuth, g.inclination));
    }
    ctx.spacing();

    text(ctx, "Buttons");
    if icon_button(ctx, image, IconButtonParams::default()) {
        g.last_action = "icon button".to_string();
    }
    ctx.same_line();
    icon_button_disabled(ctx, image, DEFAULT_DISABLED_REASON, IconButtonParams::default());
    ctx.same_line();
    button_disabled(ctx, "Export", "Nothing to export yet");
    ctx.same_line();
    help_marker(ctx, "Disabled widgets explain themselves on hover");
    image_framed(ctx, image, vec2(64.0, 64.0), ImageFramedParams::default().with_frame(2.0, ACCENT_COLOR));
    ctx.spacing();

    text(ctx, "Numbers and time");
    if input_uint(ctx, "Samples", &mut g.count) {
        g.last_action = format!("samples = {}", g.count);
    }
    if g.count == 0 {
        warning_text(ctx, "At least one sample is required");
    }
    time_formatted_hms(ctx, g.playhead, g.clip_length);
    ctx.same_line();
    text(ctx, "/");
    ctx.same_line();
    time_formatted_hms(ctx, g.clip_length, g.clip_length);
    ctx.spacing();

    text(ctx, "Dialogs");
    if open_folder_dialog(ctx, &mut g.folder, "") {
        g.last_action = "folder picked".to_string();
    }
    ctx.same_line();
    path_label(ctx, &g.folder);
    let filters = [FileFilter::new("Images", "png,jpg,jpeg"), FileFilter::new("Shaders", "glsl,frag,vert")];
    if open_file_dialog(ctx, &mut g.file, &filters, &g.folder) {
        g.last_action = "file picked".to_string();
    }
    ctx.same_line();
    path_label(ctx, &g.file);
    ctx.spacing();

    text(ctx, "Menus");
    if begin_popup_context_from_button(ctx, "Presets", PopupFlags::empty()) {
        if menu_item(ctx, "Reset angle") {
            g.angle = 0.0;
            g.last_action = "preset: reset angle".to_string();
        }
        if menu_item(ctx, "Straight down") {
            g.inclination = std::f32::consts::PI;
            g.last_action = "preset: straight down".to_string();
        }
        end_popup(ctx);
    }
    text(ctx, "Right click this row for more");
    invisible_wrapper_around_previous_line(ctx, "row_menu");
    if begin_popup_context_item(ctx, None, PopupFlags::empty()) {
        if menu_item(ctx, "Clear paths") {
            g.folder.clear();
            g.file.clear();
            g.last_action = "paths cleared".to_string();
        }
        end_popup(ctx);
    }
    ctx.spacing();

    text(ctx, &format!("Last action: {}", g.last_action));
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
        env_logger::init();
    }

    let mut ctx = UiContext::with_style(load_style());
    ctx.set_text_measure(|text, size| measure_text(text, None, size as u16, 1.0).width);

    let mut painter = MacroquadPainter::new();
    match load_ttf_font(ICON_FONT_PATH).await {
        Ok(font) => {
            log::info!("Loaded Lucide icon font");
            painter.icon_font = Some(font);
            ctx.use_icon_font = true;
        }
        Err(e) => log::warn!("Failed to load Lucide font: {}, using text buttons", e),
    }
    let image = painter.add_texture(checker_texture());

    let mut gallery = Gallery::new();

    loop {
        clear_background(BG_COLOR);

        gallery.playhead = (gallery.playhead + get_frame_time()) % gallery.clip_length;

        let area = Rect::screen(screen_width(), screen_height()).pad(16.0);
        ctx.begin_frame(FrameInput::from_macroquad(), area);
        draw_gallery(&mut ctx, &mut gallery, image);
        ctx.end_frame(&mut painter);

        next_frame().await;
    }
}
