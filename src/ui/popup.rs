//! Popup context menus
//!
//! A popup is opened by an item and stays open across frames until a menu item
//! is chosen, the user clicks outside of it, or its owner stops declaring it.
//! Every `begin_*` call that returns true must be paired with [`end_popup`].

use bitflags::bitflags;
use macroquad::prelude::*;

use super::input::PopupState;
use super::widgets::{button_item, text_baseline};
use super::{display_label, id_from_str, MouseState, Rect, UiContext};

bitflags! {
    /// Which mouse button opens a popup, and how
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PopupFlags: u32 {
        const MOUSE_BUTTON_LEFT = 1 << 0;
        const MOUSE_BUTTON_RIGHT = 1 << 1;
        const MOUSE_BUTTON_MIDDLE = 1 << 2;
        /// Don't replace a different popup that is already open
        const NO_OPEN_OVER_EXISTING_POPUP = 1 << 3;
    }
}

impl PopupFlags {
    const MOUSE_BUTTONS: Self = Self::MOUSE_BUTTON_LEFT
        .union(Self::MOUSE_BUTTON_RIGHT)
        .union(Self::MOUSE_BUTTON_MIDDLE);

    /// Was the configured button pressed this frame? `default` applies when
    /// no button flag is set.
    fn triggered(self, mouse: &MouseState, default: PopupFlags) -> bool {
        let buttons = match self & Self::MOUSE_BUTTONS {
            none if none.is_empty() => default,
            some => some,
        };
        (buttons.contains(Self::MOUSE_BUTTON_LEFT) && mouse.left_pressed)
            || (buttons.contains(Self::MOUSE_BUTTON_RIGHT) && mouse.right_pressed)
            || (buttons.contains(Self::MOUSE_BUTTON_MIDDLE) && mouse.middle_pressed)
    }
}

/// Open the popup `id` with its top-left corner at `anchor`
fn open_popup(ctx: &mut UiContext, id: u64, anchor: Vec2, flags: PopupFlags) {
    if flags.contains(PopupFlags::NO_OPEN_OVER_EXISTING_POPUP) && ctx.popup.is_some_and(|p| p.id != id) {
        return;
    }
    log::debug!("Opening popup {:x}", id);
    ctx.popup = Some(PopupState {
        id,
        anchor,
        opened_frame: ctx.frame_index(),
        rect: None,
        submitted: false,
        closing: false,
    });
}

/// If popup `id` is open, start declaring its content
fn begin_popup(ctx: &mut UiContext, id: u64) -> bool {
    if ctx.in_popup_scope() {
        log::warn!("Nested popups are not supported");
        return false;
    }
    let anchor = match ctx.popup.as_mut() {
        Some(popup) if popup.id == id => {
            popup.submitted = true;
            popup.anchor
        }
        _ => return false,
    };
    ctx.begin_popup_scope(anchor);
    true
}

/// Button that opens a context menu when clicked.
///
/// Left click opens it unless `flags` selects another mouse button. Returns
/// true while the menu is open; declare its items then call [`end_popup`].
pub fn begin_popup_context_from_button(ctx: &mut UiContext, label: &str, flags: PopupFlags) -> bool {
    let item = button_item(ctx, label);
    if item.hovered && flags.triggered(&ctx.mouse, PopupFlags::MOUSE_BUTTON_LEFT) {
        open_popup(ctx, item.id, vec2(item.rect.x, item.rect.bottom() + 2.0), flags);
    }
    begin_popup(ctx, item.id)
}

/// Context menu on the previously declared item, opened at the mouse.
///
/// Right click opens it unless `flags` selects another mouse button. The popup
/// id is `str_id` when given, otherwise the previous item's id.
pub fn begin_popup_context_item(ctx: &mut UiContext, str_id: Option<&str>, flags: PopupFlags) -> bool {
    let Some(item) = ctx.last_item() else {
        return false;
    };
    let id = str_id.map_or(item.id, id_from_str);
    if item.hovered && flags.triggered(&ctx.mouse, PopupFlags::MOUSE_BUTTON_RIGHT) {
        let at = ctx.mouse.pos();
        open_popup(ctx, id, at, flags);
    }
    begin_popup(ctx, id)
}

/// Cover the previous line with an invisible interactive region called
/// `str_id`, so context menus and tooltips can attach to widgets that don't
/// support them (e.g. a whole row of composite widgets).
pub fn invisible_wrapper_around_previous_line(ctx: &mut UiContext, str_id: &str) {
    // Composite widgets report their main part as the last item, so cover
    // the whole row they were laid out on
    let Some(line) = ctx.current_line().or_else(|| ctx.last_item().map(|item| item.rect)) else {
        return;
    };
    let rect = Rect::from_min_max(vec2(ctx.layout_left(), line.y), vec2(line.right(), line.bottom()));
    ctx.interact(id_from_str(str_id), rect);
}

/// Entry inside an open popup. Returns true when chosen; the popup closes.
pub fn menu_item(ctx: &mut UiContext, label: &str) -> bool {
    if !ctx.in_popup_scope() {
        log::warn!("menu_item \"{}\" declared outside of a popup", label);
        return false;
    }
    let shown = display_label(label);
    let pad = ctx.style.frame_padding;
    let min_w = ctx.style.popup_min_width - pad * 2.0;
    let w = (ctx.text_width(shown) + pad * 4.0).max(min_w);
    let rect = ctx.allocate(w, ctx.style.frame_height());
    let item = ctx.interact(id_from_str(label), rect);

    let size = ctx.style.font_size;
    let hover = ctx.style.popup_hover;
    let text_color = ctx.style.text;
    let list = ctx.draw_list();
    if item.hovered {
        list.rect(rect, hover);
    }
    list.text(shown, vec2(rect.x + pad * 2.0, text_baseline(&rect, size)), size, text_color);

    if item.clicked {
        close_current_popup(ctx);
    }
    item.clicked
}

/// Close the open popup at the next `end_popup`
pub fn close_current_popup(ctx: &mut UiContext) {
    if let Some(popup) = ctx.popup.as_mut() {
        popup.closing = true;
    }
}

pub fn is_popup_open(ctx: &UiContext, str_id: &str) -> bool {
    let id = id_from_str(str_id);
    ctx.popup.is_some_and(|p| p.id == id)
}

/// Finish a popup started by a `begin_popup_*` call that returned true
pub fn end_popup(ctx: &mut UiContext) {
    let Some(rect) = ctx.end_popup_scope() else {
        log::warn!("end_popup without a matching begin");
        return;
    };
    let frame = ctx.frame_index();
    let mouse = ctx.mouse;

    let Some(popup) = ctx.popup.as_mut() else {
        return;
    };
    let clicked_outside = mouse.any_pressed() && !mouse.inside(&rect) && popup.opened_frame != frame;
    if popup.closing || clicked_outside {
        log::debug!("Closing popup {:x}", popup.id);
        ctx.popup = None;
    } else {
        popup.rect = Some(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::*;
    use crate::ui::widgets::button;
    use crate::ui::{DrawCmd, FrameInput, NullPainter};

    /// Declare a "File" menu button with two entries; returns the chosen entry
    fn file_menu(ctx: &mut UiContext, input: FrameInput) -> (bool, Option<&'static str>) {
        ctx.begin_frame(input, AREA);
        let mut chosen = None;
        let open = begin_popup_context_from_button(ctx, "File", PopupFlags::empty());
        if open {
            if menu_item(ctx, "New") {
                chosen = Some("New");
            }
            if menu_item(ctx, "Open") {
                chosen = Some("Open");
            }
            end_popup(ctx);
        }
        ctx.end_frame(&mut NullPainter);
        (open, chosen)
    }

    fn release() -> FrameInput {
        hover(0.0, 0.0)
    }

    #[test]
    fn test_flags_default_button() {
        let left = MouseState { left_pressed: true, ..Default::default() };
        let right = MouseState { right_pressed: true, ..Default::default() };

        assert!(PopupFlags::empty().triggered(&left, PopupFlags::MOUSE_BUTTON_LEFT));
        assert!(!PopupFlags::empty().triggered(&right, PopupFlags::MOUSE_BUTTON_LEFT));
        assert!(PopupFlags::MOUSE_BUTTON_RIGHT.triggered(&right, PopupFlags::MOUSE_BUTTON_LEFT));
        assert!(!PopupFlags::MOUSE_BUTTON_RIGHT.triggered(&left, PopupFlags::MOUSE_BUTTON_LEFT));
    }

    #[test]
    fn test_button_opens_and_stays_open() {
        let mut ctx = UiContext::new();
        assert_eq!(file_menu(&mut ctx, release()).0, false);
        assert_eq!(file_menu(&mut ctx, press(5.0, 5.0)).0, true);
        assert_eq!(file_menu(&mut ctx, release()).0, true);
        assert!(is_popup_open(&ctx, "File"));
    }

    #[test]
    fn test_menu_item_choice_closes() {
        let mut ctx = UiContext::new();
        file_menu(&mut ctx, press(5.0, 5.0));
        file_menu(&mut ctx, release());

        // First entry sits just below the button, inside the popup padding
        let button_bottom = ctx.style.frame_height();
        let y = button_bottom + 2.0 + ctx.style.frame_padding + 3.0;
        let (open, chosen) = file_menu(&mut ctx, press(10.0, y));
        assert!(open);
        assert_eq!(chosen, Some("New"));
        assert!(!is_popup_open(&ctx, "File"));

        assert_eq!(file_menu(&mut ctx, release()).0, false);
    }

    #[test]
    fn test_click_outside_closes() {
        let mut ctx = UiContext::new();
        file_menu(&mut ctx, press(5.0, 5.0));
        file_menu(&mut ctx, release());
        let (open, chosen) = file_menu(&mut ctx, press(700.0, 500.0));
        assert!(open && chosen.is_none());
        assert!(!is_popup_open(&ctx, "File"));
    }

    #[test]
    fn test_popup_closes_when_not_declared() {
        let mut ctx = UiContext::new();
        file_menu(&mut ctx, press(5.0, 5.0));

        ctx.begin_frame(release(), AREA);
        ctx.end_frame(&mut NullPainter);
        ctx.begin_frame(release(), AREA);
        assert!(!is_popup_open(&ctx, "File"));
    }

    #[test]
    fn test_popup_blocks_items_underneath() {
        let mut ctx = UiContext::new();
        file_menu(&mut ctx, press(5.0, 5.0));
        file_menu(&mut ctx, release());

        // Inside the popup frame but left of the entries, over a button that
        // sits under the open menu
        let y = ctx.style.frame_height() + 10.0;
        ctx.begin_frame(press(2.0, y), AREA);
        assert!(begin_popup_context_from_button(&mut ctx, "File", PopupFlags::empty()));
        assert!(!menu_item(&mut ctx, "New"));
        assert!(!menu_item(&mut ctx, "Open"));
        end_popup(&mut ctx);
        let under = button(&mut ctx, "Underneath");
        let under_item = ctx.last_item();
        assert!(under_item.is_some_and(|item| item.rect.contains(2.0, y)));
        assert!(!under);
        assert!(under_item.is_some_and(|item| !item.hovered));
        assert!(is_popup_open(&ctx, "File"));
    }

    #[test]
    fn test_background_drawn_under_items() {
        let mut ctx = UiContext::new();
        file_menu(&mut ctx, press(5.0, 5.0));

        let cmds: Vec<_> = ctx.commands().cloned().collect();
        let bg = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Rect { color, .. } if *color == ctx.style.popup_bg))
            .unwrap();
        let entry = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Text { text, .. } if text == "New"))
            .unwrap();
        assert!(bg < entry);
    }

    #[test]
    fn test_context_item_with_wrapper() {
        let mut ctx = UiContext::new();
        let frame = |ctx: &mut UiContext, input: FrameInput| -> bool {
            ctx.begin_frame(input, AREA);
            crate::ui::widgets::text(ctx, "Row");
            invisible_wrapper_around_previous_line(ctx, "row_wrapper");
            let open = begin_popup_context_item(ctx, None, PopupFlags::empty());
            if open {
                menu_item(ctx, "Delete");
                end_popup(ctx);
            }
            ctx.end_frame(&mut NullPainter);
            open
        };

        // Left click does nothing, right click opens at the mouse
        assert!(!frame(&mut ctx, press(5.0, 5.0)));
        assert!(frame(&mut ctx, right_press(5.0, 5.0)));
        assert!(is_popup_open(&ctx, "row_wrapper"));
        assert_eq!(ctx.popup.map(|p| p.anchor), Some(vec2(5.0, 5.0)));
    }

    #[test]
    fn test_wrapper_covers_composite_row() {
        let mut ctx = UiContext::new();
        let spacing = ctx.style.item_spacing;
        let mut angle = 0.0;
        let mut frame = |ctx: &mut UiContext, input: FrameInput| -> bool {
            ctx.begin_frame(input, AREA);
            crate::ui::angle_wheel(ctx, "Angle", &mut angle, crate::ui::AngleWheelParams::default());
            invisible_wrapper_around_previous_line(ctx, "angle_row");
            let open = begin_popup_context_item(ctx, None, PopupFlags::empty());
            if open {
                menu_item(ctx, "Reset");
                end_popup(ctx);
            }
            ctx.end_frame(&mut NullPainter);
            open
        };

        frame(&mut ctx, release());
        let wrapper = ctx.last_item().map(|item| item.rect);
        let readout_right = 50.0 + spacing + ctx.text_width("Angle 0.0°");
        assert_eq!(wrapper, Some(Rect::new(0.0, 0.0, readout_right, 50.0)));

        // Right click on the readout text, right of the wheel
        assert!(frame(&mut ctx, right_press(60.0, 10.0)));
        assert!(is_popup_open(&ctx, "angle_row"));
    }

    #[test]
    fn test_menu_item_outside_popup() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(press(5.0, 5.0), AREA);
        assert!(!menu_item(&mut ctx, "Stray"));
    }
}
