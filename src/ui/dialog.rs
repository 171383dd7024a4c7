//! File and folder dialog buttons
//!
//! The button opens a native picker and blocks until the user answers. The
//! picker itself sits behind [`FileDialogs`] so applications (and tests) can
//! swap it out with `UiContext::set_file_dialogs`.

use std::path::{Path, PathBuf};

use macroquad::prelude::*;

use super::widgets::{button_item, text_baseline, tooltip};
use super::{icon, UiContext};

/// A named group of selectable file types, e.g. `("Source code", "c,cpp,cc")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    /// Comma-separated extensions without dots
    pub extensions: String,
}

impl FileFilter {
    pub fn new(label: impl Into<String>, extensions: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extensions: extensions.into(),
        }
    }

    /// Individual extensions, trimmed, with any leading dot removed
    pub fn extension_list(&self) -> Vec<&str> {
        self.extensions
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}

/// Platform picker used by the dialog buttons. `None` means cancelled.
pub trait FileDialogs {
    fn pick_file(&mut self, filters: &[FileFilter], base_folder: Option<&Path>) -> Option<PathBuf>;
    fn pick_folder(&mut self, base_folder: Option<&Path>) -> Option<PathBuf>;
}

/// Native dialogs through rfd
pub struct NativeDialogs;

#[cfg(not(target_arch = "wasm32"))]
impl FileDialogs for NativeDialogs {
    fn pick_file(&mut self, filters: &[FileFilter], base_folder: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new();
        for filter in filters {
            dialog = dialog.add_filter(filter.label.as_str(), &filter.extension_list());
        }
        if let Some(folder) = base_folder {
            dialog = dialog.set_directory(folder);
        }
        dialog.pick_file()
    }

    fn pick_folder(&mut self, base_folder: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new();
        if let Some(folder) = base_folder {
            dialog = dialog.set_directory(folder);
        }
        dialog.pick_folder()
    }
}

#[cfg(target_arch = "wasm32")]
impl FileDialogs for NativeDialogs {
    fn pick_file(&mut self, _filters: &[FileFilter], _base_folder: Option<&Path>) -> Option<PathBuf> {
        log::warn!("File dialogs are not available in the browser");
        None
    }

    fn pick_folder(&mut self, _base_folder: Option<&Path>) -> Option<PathBuf> {
        log::warn!("Folder dialogs are not available in the browser");
        None
    }
}

/// Empty string means "platform default"
fn base_folder_path(base_folder: &str) -> Option<&Path> {
    (!base_folder.is_empty()).then(|| Path::new(base_folder))
}

/// Square button showing an icon glyph (or "..." without the icon font)
fn dialog_button(ctx: &mut UiContext, id_label: &str, glyph: char) -> bool {
    // Several dialog buttons of one kind can sit in the same window
    let id_label = format!("{id_label}{}", ctx.next_id());
    let label = if ctx.use_icon_font { id_label } else { format!("...{id_label}") };
    let item = button_item(ctx, &label);

    if ctx.use_icon_font {
        // Paint the glyph over the (empty) button label
        let size = ctx.style.font_size;
        let color = ctx.style.text;
        ctx.draw_list().glyph(glyph, item.rect, size, color);
    }
    item.clicked
}

/// Write a picked path into `out_path`, or leave it alone on cancel
fn store_pick(out_path: &mut String, picked: Option<PathBuf>, kind: &str) -> bool {
    match picked {
        Some(path) => {
            log::debug!("{} dialog picked {}", kind, path.display());
            *out_path = path.to_string_lossy().into_owned();
            true
        }
        None => {
            log::debug!("{} dialog cancelled", kind);
            false
        }
    }
}

/// Button that opens a folder dialog.
///
/// `base_folder` is where the dialog starts (empty for the platform default).
/// Returns true iff the button was clicked and `out_path` was set (the dialog
/// was not cancelled).
pub fn open_folder_dialog(ctx: &mut UiContext, out_path: &mut String, base_folder: &str) -> bool {
    let clicked = dialog_button(ctx, "##open_folder_dialog", icon::FOLDER_OPEN);
    tooltip(ctx, "Select a folder");
    if !clicked {
        return false;
    }
    let picked = ctx.file_dialogs().pick_folder(base_folder_path(base_folder));
    store_pick(out_path, picked, "Folder")
}

/// Button that opens a file dialog restricted to `filters` (all files when
/// empty). Same contract as [`open_folder_dialog`].
pub fn open_file_dialog(ctx: &mut UiContext, out_path: &mut String, filters: &[FileFilter], base_folder: &str) -> bool {
    let clicked = dialog_button(ctx, "##open_file_dialog", icon::FILE);
    tooltip(ctx, "Select a file");
    if !clicked {
        return false;
    }
    let picked = ctx.file_dialogs().pick_file(filters, base_folder_path(base_folder));
    store_pick(out_path, picked, "File")
}

/// Read-only path display, usually placed on the same line as a dialog button
pub fn path_label(ctx: &mut UiContext, path: &str) {
    let size = ctx.style.font_size;
    let pad = ctx.style.frame_padding;
    let shown = if path.is_empty() { "(none)" } else { path };
    let rect = ctx.allocate(ctx.text_width(shown) + pad * 2.0, ctx.style.frame_height());
    let bg = ctx.style.frame_bg;
    let color = if path.is_empty() { ctx.style.text_dim } else { ctx.style.text };

    let list = ctx.draw_list();
    list.rect(rect, bg);
    list.text(shown, vec2(rect.x + pad, text_baseline(&rect, size)), size, color);
    let id = ctx.next_id();
    ctx.register_item(id, rect);
}
