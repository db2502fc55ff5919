//! Small egui widget kit for the Pinboard toolbar and options bar.
//!
//! - **Buttons**: tool toggles, text actions, stroke width and font size pickers
//! - **Colors**: the pen and note palettes, clickable swatches
//! - **Layout**: separators, section labels, panel frames

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{ActionButton, FontSizeButton, StrokeWidthButton, ToolButton};
pub use colors::{ColorSwatch, NOTE_COLORS, PEN_COLORS, colors_match};
pub use layout::{panel_frame, section_label, toolbar_frame, vertical_separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (color swatches)
    pub const SMALL: f32 = 20.0;
    /// Toolbar button height
    pub const MEDIUM: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text color
    pub const TEXT_DISABLED: Color32 = Color32::from_rgb(180, 180, 180);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 235, 235);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
