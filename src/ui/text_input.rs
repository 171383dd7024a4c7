//! Text editing buffer and the unsigned integer input field

use macroquad::prelude::*;

use super::widgets::{button, text_baseline, text_colored};
use super::{display_label, id_from_str, EditState, Key, KeyState, UiContext};

/// Edit buffer of a focused text field
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Selection start (byte index), if selecting
    pub selection_start: Option<usize>,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            selection_start: None,
        }
    }

    /// Get selected text range (start, end) in sorted order
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_start
            .map(|start| (start.min(self.cursor), start.max(self.cursor)))
            .filter(|(start, end)| start != end)
    }

    /// Delete selected text and return cursor to selection start
    fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) => {
                self.text.drain(start..end);
                self.cursor = start;
                self.selection_start = None;
                true
            }
            None => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map_or(self.text.len(), |(i, _)| self.cursor + i)
    }

    /// Move the cursor to `pos`, extending or dropping the selection
    fn move_to(&mut self, pos: usize, extend_selection: bool) {
        if extend_selection {
            self.selection_start.get_or_insert(self.cursor);
        } else {
            self.selection_start = None;
        }
        self.cursor = pos;
    }

    pub fn move_left(&mut self, extend_selection: bool) {
        // Collapsing a selection lands on its start
        if let (false, Some((start, _))) = (extend_selection, self.selection_range()) {
            self.move_to(start, false);
            return;
        }
        let pos = self.prev_boundary();
        self.move_to(pos, extend_selection);
    }

    pub fn move_right(&mut self, extend_selection: bool) {
        if let (false, Some((_, end))) = (extend_selection, self.selection_range()) {
            self.move_to(end, false);
            return;
        }
        let pos = self.next_boundary();
        self.move_to(pos, extend_selection);
    }

    pub fn select_all(&mut self) {
        self.selection_start = Some(0);
        self.cursor = self.text.len();
    }

    /// Insert a character at cursor, replacing selection if any
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    /// Delete character after cursor
    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
    }

    /// Apply one frame of keyboard input, returns true if text changed
    pub fn apply_keys(&mut self, keys: &KeyState) -> bool {
        let before = self.text.clone();

        for key in &keys.pressed {
            match key {
                Key::Left => self.move_left(keys.shift),
                Key::Right => self.move_right(keys.shift),
                Key::Home => self.move_to(0, keys.shift),
                Key::End => self.move_to(self.text.len(), keys.shift),
                Key::Backspace => self.backspace(),
                Key::Delete => self.delete(),
                Key::Enter | Key::Escape => {}
            }
        }
        for &ch in &keys.chars {
            self.insert_char(ch);
        }

        self.text != before
    }
}

/// Parse user entry for an unsigned field.
///
/// Negative entries clamp to 0 and entries beyond `u32::MAX` clamp to the
/// maximum, so the bound value can never wrap. Returns None for text that is
/// not a number.
pub fn parse_uint_entry(entry: &str) -> Option<u32> {
    let entry = entry.trim();
    let (negative, digits) = match entry.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, entry.strip_prefix('+').unwrap_or(entry)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Like an integer input, but for a `u32`.
///
/// Click the field to edit, Enter (or clicking elsewhere) commits and Escape
/// cancels. The `-`/`+` buttons step by one and saturate. Returns true iff
/// `value` changed this frame.
pub fn input_uint(ctx: &mut UiContext, label: &str, value: &mut u32) -> bool {
    let id = id_from_str(label);
    let field = ctx.allocate(ctx.style.input_width, ctx.style.frame_height());
    let item = ctx.interact(id, field);
    let mut changed = false;

    let focused = ctx.editing.as_ref().is_some_and(|edit| edit.id == id);
    if focused {
        let keys = ctx.keys.clone();
        let clicked_away = ctx.mouse.left_pressed && !item.hovered;
        if keys.is_pressed(Key::Escape) {
            ctx.editing = None;
        } else if let Some(edit) = ctx.editing.as_mut() {
            edit.declared = true;
            edit.buffer.apply_keys(&keys);
            if keys.is_pressed(Key::Enter) || clicked_away {
                if let Some(parsed) = parse_uint_entry(&edit.buffer.text) {
                    changed = parsed != *value;
                    *value = parsed;
                }
                ctx.editing = None;
            }
        }
    } else if item.clicked {
        // Focus moves next frame so a field focused elsewhere can still commit
        let mut buffer = TextInputState::new(value.to_string());
        buffer.select_all();
        ctx.focus_request = Some(EditState { id, buffer, declared: false });
    }

    draw_field(ctx, field, id, *value);

    ctx.same_line();
    if button(ctx, &format!("-##{label}")) {
        let stepped = value.saturating_sub(1);
        changed |= stepped != *value;
        *value = stepped;
    }
    ctx.same_line();
    if button(ctx, &format!("+##{label}")) {
        let stepped = value.saturating_add(1);
        changed |= stepped != *value;
        *value = stepped;
    }
    ctx.same_line();
    let color = ctx.style.text;
    text_colored(ctx, display_label(label), color);
    ctx.set_last_item(item);

    changed
}

/// Field background, text, and (when focused) selection and cursor
fn draw_field(ctx: &mut UiContext, field: super::Rect, id: u64, value: u32) {
    let size = ctx.style.font_size;
    let pad = ctx.style.frame_padding;
    let text_x = field.x + pad;
    let baseline = text_baseline(&field, size);

    let edit = ctx.editing.as_ref().filter(|edit| edit.id == id).map(|edit| edit.buffer.clone());
    let border = if edit.is_some() { ctx.style.accent } else { ctx.style.frame_border };
    let bg = ctx.style.frame_bg;
    let text_color = ctx.style.text;
    let selection_color = Color::new(ctx.style.accent.r, ctx.style.accent.g, ctx.style.accent.b, 0.4);

    // Measure before borrowing the draw list
    let measured = edit.as_ref().map(|buffer| {
        let cursor_x = text_x + ctx.text_width(&buffer.text[..buffer.cursor]);
        let selection = buffer.selection_range().map(|(start, end)| {
            let x0 = text_x + ctx.text_width(&buffer.text[..start]);
            let x1 = text_x + ctx.text_width(&buffer.text[..end]);
            (x0, x1)
        });
        (cursor_x, selection)
    });

    let list = ctx.draw_list();
    list.rect(field, bg);
    list.rect_lines(field, 1.0, border);
    match (edit, measured) {
        (Some(buffer), Some((cursor_x, selection))) => {
            if let Some((x0, x1)) = selection {
                list.rect(super::Rect::new(x0, field.y + 3.0, x1 - x0, field.h - 6.0), selection_color);
            }
            list.text(buffer.text, vec2(text_x, baseline), size, text_color);
            list.line(vec2(cursor_x, field.y + 4.0), vec2(cursor_x, field.bottom() - 4.0), 1.5, text_color);
        }
        _ => list.text(value.to_string(), vec2(text_x, baseline), size, text_color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::*;
    use crate::ui::FrameInput;

    /// Click the field of an `input_uint` at the frame origin
    fn focus(ctx: &mut UiContext, value: &mut u32) {
        ctx.begin_frame(press(5.0, 5.0), AREA);
        assert!(!input_uint(ctx, "Count", value));
        ctx.begin_frame(hover(5.0, 5.0), AREA);
        input_uint(ctx, "Count", value);
    }

    fn type_and_commit(ctx: &mut UiContext, value: &mut u32, entry: &str) -> bool {
        focus(ctx, value);
        ctx.begin_frame(typing(entry, &[Key::Enter]), AREA);
        input_uint(ctx, "Count", value)
    }

    #[test]
    fn test_parse_uint_entry() {
        assert_eq!(parse_uint_entry("42"), Some(42));
        assert_eq!(parse_uint_entry(" +7 "), Some(7));
        assert_eq!(parse_uint_entry("-5"), Some(0));
        assert_eq!(parse_uint_entry("-0"), Some(0));
        assert_eq!(parse_uint_entry("99999999999"), Some(u32::MAX));
        assert_eq!(parse_uint_entry("4294967295"), Some(u32::MAX));
        assert_eq!(parse_uint_entry(""), None);
        assert_eq!(parse_uint_entry("-"), None);
        assert_eq!(parse_uint_entry("12a"), None);
    }

    #[test]
    fn test_typed_value_commits_on_enter() {
        let mut ctx = UiContext::new();
        let mut value = 3;
        // Focusing selects everything, so typing replaces the old value
        assert!(type_and_commit(&mut ctx, &mut value, "128"));
        assert_eq!(value, 128);
        assert!(ctx.editing.is_none());
    }

    #[test]
    fn test_negative_entry_clamps_to_zero() {
        let mut ctx = UiContext::new();
        let mut value = 10;
        assert!(type_and_commit(&mut ctx, &mut value, "-5"));
        assert_eq!(value, 0);
    }

    #[test]
    fn test_unchanged_or_invalid_entry_reports_no_change() {
        let mut ctx = UiContext::new();
        let mut value = 10;
        assert!(!type_and_commit(&mut ctx, &mut value, "10"));
        assert!(!type_and_commit(&mut ctx, &mut value, "abc"));
        assert_eq!(value, 10);
    }

    #[test]
    fn test_escape_cancels() {
        let mut ctx = UiContext::new();
        let mut value = 10;
        focus(&mut ctx, &mut value);
        ctx.begin_frame(typing("77", &[Key::Escape]), AREA);
        assert!(!input_uint(&mut ctx, "Count", &mut value));
        assert_eq!(value, 10);
        assert!(ctx.editing.is_none());
    }

    #[test]
    fn test_click_away_commits() {
        let mut ctx = UiContext::new();
        let mut value = 1;
        focus(&mut ctx, &mut value);
        ctx.begin_frame(typing("9", &[]), AREA);
        assert!(!input_uint(&mut ctx, "Count", &mut value));
        ctx.begin_frame(press(700.0, 500.0), AREA);
        assert!(input_uint(&mut ctx, "Count", &mut value));
        assert_eq!(value, 9);
    }

    #[test]
    fn test_clicking_another_field_commits_the_edit() {
        let mut ctx = UiContext::new();
        let row = ctx.style.frame_height() + ctx.style.item_spacing;
        let (mut b, mut a) = (5, 1);
        let frame = |ctx: &mut UiContext, input: FrameInput, b: &mut u32, a: &mut u32| {
            ctx.begin_frame(input, AREA);
            let b_changed = input_uint(ctx, "B", b);
            let a_changed = input_uint(ctx, "A", a);
            (b_changed, a_changed)
        };

        frame(&mut ctx, press(5.0, row + 5.0), &mut b, &mut a);
        frame(&mut ctx, hover(5.0, row + 5.0), &mut b, &mut a);
        frame(&mut ctx, typing("42", &[]), &mut b, &mut a);

        // B is declared first, yet A still commits before B takes focus
        let (b_changed, a_changed) = frame(&mut ctx, press(5.0, 5.0), &mut b, &mut a);
        assert!(a_changed && !b_changed);
        assert_eq!(a, 42);
        assert_eq!(b, 5);

        frame(&mut ctx, hover(5.0, 5.0), &mut b, &mut a);
        assert_eq!(ctx.editing.as_ref().map(|edit| edit.id), Some(id_from_str("B")));
    }

    #[test]
    fn test_focus_dropped_when_field_disappears() {
        let mut ctx = UiContext::new();
        let mut value = 3;
        focus(&mut ctx, &mut value);
        ctx.begin_frame(typing("9", &[]), AREA);
        input_uint(&mut ctx, "Count", &mut value);

        // One frame without the field, then it comes back unfocused
        ctx.begin_frame(hover(500.0, 500.0), AREA);
        ctx.begin_frame(hover(500.0, 500.0), AREA);
        assert!(ctx.editing.is_none());
        assert!(!input_uint(&mut ctx, "Count", &mut value));
        assert_eq!(value, 3);
    }

    #[test]
    fn test_step_buttons_saturate() {
        let mut ctx = UiContext::new();
        let width = ctx.style.input_width;
        let spacing = ctx.style.item_spacing;
        // The "-" button starts right after the field
        let minus = (width + spacing + 2.0, 5.0);

        let mut value = 1;
        ctx.begin_frame(press(minus.0, minus.1), AREA);
        assert!(input_uint(&mut ctx, "Count", &mut value));
        assert_eq!(value, 0);

        ctx.begin_frame(FrameInput::default(), AREA);
        input_uint(&mut ctx, "Count", &mut value);
        ctx.begin_frame(press(minus.0, minus.1), AREA);
        assert!(!input_uint(&mut ctx, "Count", &mut value));
        assert_eq!(value, 0);
    }

    #[test]
    fn test_buffer_editing() {
        let mut buf = TextInputState::new("héllo");
        buf.move_left(false);
        buf.backspace();
        assert_eq!(buf.text, "hélo");
        buf.move_to(0, false);
        buf.move_right(true);
        buf.move_right(true);
        assert_eq!(buf.selection_range(), Some((0, 3)));
        buf.insert_char('J');
        assert_eq!(buf.text, "Jlo");
        buf.delete();
        assert_eq!(buf.text, "Jo");
    }
}
