//! Color palettes and the clickable swatch.

use egui::{Color32, CornerRadius, CursorIcon, Rect, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// Pen and text colors offered in the toolbar and options bar.
pub const PEN_COLORS: &[(&str, Color32)] = &[
    ("Black", Color32::from_rgb(0, 0, 0)),
    ("Gray", Color32::from_rgb(107, 114, 128)),
    ("Red", Color32::from_rgb(239, 68, 68)),
    ("Orange", Color32::from_rgb(249, 115, 22)),
    ("Green", Color32::from_rgb(34, 197, 94)),
    ("Blue", Color32::from_rgb(59, 130, 246)),
    ("Purple", Color32::from_rgb(168, 85, 247)),
];

/// Sticky note backgrounds.
pub const NOTE_COLORS: &[(&str, Color32)] = &[
    ("Yellow", Color32::from_rgb(254, 240, 138)),
    ("Pink", Color32::from_rgb(251, 207, 232)),
    ("Green", Color32::from_rgb(187, 247, 208)),
    ("Blue", Color32::from_rgb(191, 219, 254)),
    ("Orange", Color32::from_rgb(254, 215, 170)),
    ("White", Color32::from_rgb(255, 255, 255)),
];

/// Compare colors ignoring alpha.
pub fn colors_match(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}

/// A clickable color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    square: bool,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            square: false,
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Draw as a rounded square, used for note backgrounds.
    pub fn square(mut self) -> Self {
        self.square = true;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let size = vec2(sizing::SMALL, sizing::SMALL);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if self.square {
                let radius = CornerRadius::same(sizing::CORNER_RADIUS);
                painter.rect_filled(rect, radius, self.color);
                let outline = if self.selected {
                    Stroke::new(2.0, theme::ACCENT)
                } else {
                    Stroke::new(1.0, theme::BORDER)
                };
                painter.rect_stroke(rect, radius, outline, StrokeKind::Inside);
            } else {
                let center = rect.center();
                let radius = rect.width().min(rect.height()) / 2.0;
                painter.circle_filled(center, radius, self.color);
                if self.selected {
                    // Inner offset ring
                    painter.circle_stroke(
                        center,
                        radius - 3.0,
                        Stroke::new(2.0, Color32::from_gray(230)),
                    );
                } else if self.color == Color32::WHITE {
                    painter.circle_stroke(center, radius, Stroke::new(1.0, theme::BORDER));
                }
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}
