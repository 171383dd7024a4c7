//! Input state and the UI context passed through the frame

use macroquad::prelude::{vec2, Vec2};

use super::dialog::{FileDialogs, NativeDialogs};
use super::{DrawCmd, DrawList, Painter, Rect, Style, TextInputState};

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub right_pressed: bool,
    pub middle_pressed: bool,
}

impl MouseState {
    pub fn pos(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }

    /// Any button pressed this frame
    pub fn any_pressed(&self) -> bool {
        self.left_pressed || self.right_pressed || self.middle_pressed
    }
}

/// Editing keys the widgets react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Keyboard input for one frame
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    /// Keys pressed this frame
    pub pressed: Vec<Key>,
    /// Printable characters typed this frame
    pub chars: Vec<char>,
    pub shift: bool,
    /// Ctrl, or Cmd on Mac
    pub ctrl: bool,
}

impl KeyState {
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Everything the widgets need to know about the user for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub mouse: MouseState,
    pub keys: KeyState,
}

impl FrameInput {
    /// Sample macroquad's input state. Must run inside the macroquad loop.
    pub fn from_macroquad() -> Self {
        use macroquad::prelude::*;

        let (x, y) = mouse_position();
        let mouse = MouseState {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
        };

        let bindings = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::KpEnter, Key::Enter),
            (KeyCode::Escape, Key::Escape),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Delete, Key::Delete),
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
        ];
        let pressed = bindings
            .iter()
            .filter(|(code, _)| is_key_pressed(*code))
            .map(|(_, key)| *key)
            .collect();

        let mut chars = Vec::new();
        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' {
                chars.push(ch);
            }
        }

        let keys = KeyState {
            pressed,
            chars,
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            ctrl: is_key_down(KeyCode::LeftControl)
                || is_key_down(KeyCode::RightControl)
                || is_key_down(KeyCode::LeftSuper)
                || is_key_down(KeyCode::RightSuper),
        };

        Self { mouse, keys }
    }
}

/// Interaction result of the most recently declared widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemState {
    pub id: u64,
    pub rect: Rect,
    pub hovered: bool,
    /// Left button went down on the item this frame
    pub clicked: bool,
    /// Item owns the active drag (pressed earlier and still held)
    pub held: bool,
}

/// Text width function: (text, font size) -> width in pixels
pub type MeasureText = fn(&str, f32) -> f32;

/// Monospace approximation used until a real font metric is installed
pub fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

/// Stable widget id from a label (FNV-1a)
pub fn id_from_str(label: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in label.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

/// Visible part of a label: everything before a `##` id suffix
pub fn display_label(label: &str) -> &str {
    label.split_once("##").map_or(label, |(shown, _)| shown)
}

/// Vertical flow layout cursor
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    left: f32,
    next_y: f32,
    prev: Option<Rect>,
    same_line: bool,
    /// Union of everything allocated so far
    bounds: Option<Rect>,
    /// Union of the items on the current row
    line: Option<Rect>,
}

impl Layout {
    fn at(origin: Vec2) -> Self {
        Self {
            left: origin.x,
            next_y: origin.y,
            ..Default::default()
        }
    }

    fn allocate(&mut self, w: f32, h: f32, spacing: f32) -> Rect {
        let (x, y, line) = match (self.same_line, self.prev) {
            (true, Some(prev)) => (prev.right() + spacing, prev.y, self.line),
            _ => (self.left, self.next_y, None),
        };
        self.same_line = false;

        let rect = Rect::new(x, y, w, h);
        self.next_y = self.next_y.max(rect.bottom() + spacing);
        self.prev = Some(rect);
        self.bounds = Some(self.bounds.map_or(rect, |b| b.union(&rect)));
        self.line = Some(line.map_or(rect, |l| l.union(&rect)));
        rect
    }
}

/// An open popup, persisted across frames
#[derive(Debug, Clone, Copy)]
pub(crate) struct PopupState {
    pub id: u64,
    pub anchor: Vec2,
    pub opened_frame: u64,
    /// Popup rect recorded at the end of the previous frame
    pub rect: Option<Rect>,
    /// Whether the owner submitted the popup this frame
    pub submitted: bool,
    /// A menu item was chosen; close at `end_popup`
    pub closing: bool,
}

/// A popup whose content is being declared right now
#[derive(Debug, Clone, Copy)]
struct PopupScope {
    saved_layout: Layout,
    overlay_start: usize,
}

/// Text field with keyboard focus
#[derive(Debug, Clone)]
pub(crate) struct EditState {
    pub id: u64,
    pub buffer: TextInputState,
    /// Whether the owning field was declared this frame
    pub declared: bool,
}

/// UI context passed through the frame
///
/// Owns the per-frame input, the draw lists and the little cross-frame state
/// an immediate-mode UI needs (active drag, open popup, focused field).
/// Widgets read and write it; nothing here borrows caller values.
pub struct UiContext {
    pub mouse: MouseState,
    pub keys: KeyState,
    pub style: Style,
    /// The painter has the Lucide icon font loaded
    pub use_icon_font: bool,
    /// ID of the widget currently being dragged (if any)
    pub dragging: Option<u64>,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Counter for generating unique IDs
    id_counter: u64,
    frame: u64,
    draw: DrawList,
    overlay: DrawList,
    layout: Layout,
    last_item: Option<ItemState>,
    tooltip: Option<String>,
    pub(crate) popup: Option<PopupState>,
    popup_scope: Option<PopupScope>,
    pub(crate) editing: Option<EditState>,
    /// Field clicked this frame; takes focus at the next `begin_frame`, after
    /// the focused field had its chance to commit
    pub(crate) focus_request: Option<EditState>,
    dialogs: Box<dyn FileDialogs>,
    measure: MeasureText,
}

impl UiContext {
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            mouse: MouseState::default(),
            keys: KeyState::default(),
            style,
            use_icon_font: false,
            dragging: None,
            hot: None,
            id_counter: 0,
            frame: 0,
            draw: DrawList::new(),
            overlay: DrawList::new(),
            layout: Layout::default(),
            last_item: None,
            tooltip: None,
            popup: None,
            popup_scope: None,
            editing: None,
            focus_request: None,
            dialogs: Box::new(NativeDialogs),
            measure: approx_text_width,
        }
    }

    /// Replace the provider used by the file/folder dialog buttons
    pub fn set_file_dialogs(&mut self, dialogs: Box<dyn FileDialogs>) {
        self.dialogs = dialogs;
    }

    pub(crate) fn file_dialogs(&mut self) -> &mut dyn FileDialogs {
        self.dialogs.as_mut()
    }

    /// Install a real font metric (e.g. macroquad's `measure_text`)
    pub fn set_text_measure(&mut self, measure: MeasureText) {
        self.measure = measure;
    }

    pub fn text_width(&self, text: &str) -> f32 {
        (self.measure)(text, self.style.font_size)
    }

    /// Generate a unique ID for a widget
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code). Widgets flow downwards
    /// from the top-left of `area`.
    pub fn begin_frame(&mut self, input: FrameInput, area: Rect) {
        self.mouse = input.mouse;
        self.keys = input.keys;
        self.hot = None;
        self.id_counter = 0;
        self.frame += 1;
        self.draw.clear();
        self.overlay.clear();
        self.layout = Layout::at(vec2(area.x, area.y));
        self.last_item = None;
        self.tooltip = None;
        self.popup_scope = None;

        // Popups whose owner stopped declaring them are closed
        match self.popup {
            Some(ref mut popup) if popup.submitted => popup.submitted = false,
            Some(popup) => {
                log::debug!("Closing popup {:x}: not submitted last frame", popup.id);
                self.popup = None;
            }
            None => {}
        }

        // Same for a focused field that was not declared last frame
        match self.editing {
            Some(ref mut edit) if edit.declared => edit.declared = false,
            Some(_) => self.editing = None,
            None => {}
        }
        if let Some(request) = self.focus_request.take() {
            self.editing = Some(request);
        }

        // Clear dragging if mouse released
        if !self.mouse.left_down {
            self.dragging = None;
        }
    }

    /// Finish the frame: queue the tooltip and hand everything to the painter
    pub fn end_frame(&mut self, painter: &mut impl Painter) {
        if self.popup_scope.is_some() {
            log::warn!("Frame ended inside a popup; closing the scope");
            self.end_popup_scope();
        }
        self.draw_tooltip();
        painter.paint_list(&self.draw);
        painter.paint_list(&self.overlay);
    }

    /// All commands recorded this frame, in paint order
    pub fn commands(&self) -> impl Iterator<Item = &DrawCmd> {
        self.draw.iter().chain(self.overlay.iter())
    }

    /// Draw list that widgets currently record into
    pub fn draw_list(&mut self) -> &mut DrawList {
        if self.popup_scope.is_some() {
            &mut self.overlay
        } else {
            &mut self.draw
        }
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Reserve space for the next widget
    pub fn allocate(&mut self, w: f32, h: f32) -> Rect {
        let spacing = self.style.item_spacing;
        self.layout.allocate(w, h, spacing)
    }

    /// Place the next widget to the right of the previous one
    pub fn same_line(&mut self) {
        self.layout.same_line = true;
    }

    /// Extra vertical gap
    pub fn spacing(&mut self) {
        self.layout.next_y += self.style.item_spacing * 2.0;
    }

    /// Left edge of the current layout region
    pub fn layout_left(&self) -> f32 {
        self.layout.left
    }

    /// Union of the items on the row allocated last
    pub fn current_line(&self) -> Option<Rect> {
        self.layout.line
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Is the mouse over `rect` and not covered by an open popup?
    pub fn hit(&self, rect: &Rect) -> bool {
        if !self.mouse.inside(rect) {
            return false;
        }
        if self.popup_scope.is_none() {
            if let Some(popup_rect) = self.popup.and_then(|p| p.rect) {
                if self.mouse.inside(&popup_rect) {
                    return false;
                }
            }
        }
        true
    }

    /// Run standard press/hold behavior for a widget and make it the last item
    pub fn interact(&mut self, id: u64, rect: Rect) -> ItemState {
        let hovered = self.hit(&rect);
        if hovered {
            self.set_hot(id);
        }

        let clicked = hovered && self.mouse.left_pressed && self.dragging.is_none();
        if clicked {
            self.start_drag(id);
        }
        let held = self.is_dragging(id) && self.mouse.left_down;

        let item = ItemState { id, rect, hovered, clicked, held };
        self.last_item = Some(item);
        item
    }

    /// Register a display-only widget as the last item
    pub fn register_item(&mut self, id: u64, rect: Rect) -> ItemState {
        let item = ItemState {
            id,
            rect,
            hovered: self.hit(&rect),
            clicked: false,
            held: false,
        };
        self.last_item = Some(item);
        item
    }

    pub fn last_item(&self) -> Option<ItemState> {
        self.last_item
    }

    /// Composite widgets restore their main part as the last item after
    /// drawing decorations
    pub(crate) fn set_last_item(&mut self, item: ItemState) {
        self.last_item = Some(item);
    }

    /// Check if this widget is being dragged
    pub fn is_dragging(&self, id: u64) -> bool {
        self.dragging == Some(id)
    }

    /// Start dragging a widget
    pub fn start_drag(&mut self, id: u64) {
        self.dragging = Some(id);
    }

    /// Set hot widget (hovering)
    pub fn set_hot(&mut self, id: u64) {
        // Only set hot if not dragging something else
        if self.dragging.is_none() || self.dragging == Some(id) {
            self.hot = Some(id);
        }
    }

    /// Check if widget is hot
    pub fn is_hot(&self, id: u64) -> bool {
        self.hot == Some(id)
    }

    /// Show `text` next to the mouse at the end of this frame
    pub fn set_tooltip(&mut self, text: &str) {
        self.tooltip = Some(text.to_string());
    }

    fn draw_tooltip(&mut self) {
        let Some(text) = self.tooltip.take() else {
            return;
        };
        let size = self.style.font_size;
        let width = self.text_width(&text);
        let pad = self.style.frame_padding;
        let bg = Rect::new(self.mouse.x + 12.0, self.mouse.y + 16.0, width + pad * 2.0, size + pad * 2.0);

        let bg_color = self.style.tooltip_bg;
        let text_color = self.style.tooltip_text;
        let border = self.style.popup_border;
        self.overlay.rect(bg, bg_color);
        self.overlay.rect_lines(bg, 1.0, border);
        self.overlay.text(text, vec2(bg.x + pad, bg.y + pad + size * 0.8), size, text_color);
    }

    // -------------------------------------------------------------------------
    // Popups
    // -------------------------------------------------------------------------

    pub(crate) fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Switch layout and drawing to the popup overlay at `anchor`
    pub(crate) fn begin_popup_scope(&mut self, anchor: Vec2) {
        let pad = self.style.frame_padding;
        self.popup_scope = Some(PopupScope {
            saved_layout: self.layout,
            overlay_start: self.overlay.len(),
        });
        self.layout = Layout::at(anchor + vec2(pad, pad));
    }

    pub(crate) fn in_popup_scope(&self) -> bool {
        self.popup_scope.is_some()
    }

    /// Leave the popup overlay, returning the rect the popup content covered
    pub(crate) fn end_popup_scope(&mut self) -> Option<Rect> {
        let scope = self.popup_scope.take()?;
        let pad = self.style.frame_padding;

        let content = self.layout.bounds;
        self.layout = scope.saved_layout;

        let anchor = self.popup.map(|p| p.anchor).unwrap_or_default();
        let content = content.unwrap_or(Rect::new(anchor.x + pad, anchor.y + pad, 0.0, 0.0));
        let rect = Rect::new(
            anchor.x,
            anchor.y,
            (content.right() - anchor.x + pad).max(self.style.popup_min_width),
            content.bottom() - anchor.y + pad,
        );

        // Background goes underneath the already recorded items
        let border = self.style.popup_border;
        let bg = self.style.popup_bg;
        self.overlay.insert(scope.overlay_start, DrawCmd::Rect { rect, color: bg });
        self.overlay.insert(scope.overlay_start + 1, DrawCmd::RectLines { rect, thickness: 1.0, color: border });
        Some(rect)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
