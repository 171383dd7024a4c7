//! UI Theme - Shared colors and sizing for every widget
//!
//! `Style` carries the colors and metrics the widgets read from the context.
//! It can be saved to and loaded from RON so applications can ship a theme
//! file next to the binary.

use std::fs;
use std::path::Path;

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

/// Serde mirror of macroquad's `Color`
#[derive(Serialize, Deserialize)]
#[serde(remote = "Color")]
struct ColorDef {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Accent color (cyan)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Attention-drawing text
pub const WARNING_COLOR: Color = Color::new(1.0, 0.35, 0.3, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 14.0;

/// Error type for style files
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Colors and metrics used by all widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(with = "ColorDef")]
    pub text: Color,
    #[serde(with = "ColorDef")]
    pub text_dim: Color,
    #[serde(with = "ColorDef")]
    pub text_disabled: Color,
    #[serde(with = "ColorDef")]
    pub warning: Color,
    #[serde(with = "ColorDef")]
    pub accent: Color,

    #[serde(with = "ColorDef")]
    pub button: Color,
    #[serde(with = "ColorDef")]
    pub button_hovered: Color,
    #[serde(with = "ColorDef")]
    pub button_active: Color,
    #[serde(with = "ColorDef")]
    pub button_disabled: Color,

    /// Background of input fields and wheels
    #[serde(with = "ColorDef")]
    pub frame_bg: Color,
    #[serde(with = "ColorDef")]
    pub frame_border: Color,

    #[serde(with = "ColorDef")]
    pub popup_bg: Color,
    #[serde(with = "ColorDef")]
    pub popup_border: Color,
    #[serde(with = "ColorDef")]
    pub popup_hover: Color,

    #[serde(with = "ColorDef")]
    pub tooltip_bg: Color,
    #[serde(with = "ColorDef")]
    pub tooltip_text: Color,

    pub font_size: f32,
    /// Vertical gap between rows, horizontal gap after `same_line`
    pub item_spacing: f32,
    /// Inner padding of buttons and fields
    pub frame_padding: f32,
    /// Width of numeric input fields
    pub input_width: f32,
    pub popup_min_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text: TEXT_COLOR,
            text_dim: TEXT_DIM,
            text_disabled: Color::new(0.45, 0.45, 0.5, 1.0),
            warning: WARNING_COLOR,
            accent: ACCENT_COLOR,

            button: Color::new(0.196, 0.196, 0.216, 1.0),
            button_hovered: Color::new(0.235, 0.235, 0.275, 1.0),
            button_active: Color::new(0.0, 0.5, 0.7, 1.0),
            button_disabled: Color::new(0.15, 0.15, 0.17, 1.0),

            frame_bg: Color::new(0.12, 0.12, 0.14, 1.0),
            frame_border: Color::new(0.314, 0.314, 0.314, 1.0),

            popup_bg: Color::new(0.176, 0.176, 0.196, 1.0),
            popup_border: Color::new(0.314, 0.314, 0.333, 1.0),
            popup_hover: Color::new(0.235, 0.314, 0.392, 1.0),

            tooltip_bg: Color::new(0.118, 0.118, 0.137, 0.94),
            tooltip_text: Color::new(1.0, 1.0, 1.0, 1.0),

            font_size: FONT_SIZE_CONTENT,
            item_spacing: 4.0,
            frame_padding: 4.0,
            input_width: 80.0,
            popup_min_width: 120.0,
        }
    }
}

impl Style {
    /// Height of a single-line widget (text plus padding)
    pub fn frame_height(&self) -> f32 {
        (self.font_size + self.frame_padding * 2.0).round()
    }

    /// Load a style from a RON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(contents: &str) -> Result<Self, StyleError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save the style as pretty-printed RON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StyleError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, config)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
