//! Button components for the toolbar and the options bar.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Response, Sense, Stroke,
    StrokeKind, Ui, vec2,
};

use crate::{sizing, theme};

fn button_background(selected: bool, response: &Response) -> Color32 {
    if selected {
        theme::ACCENT
    } else if response.hovered() {
        theme::HOVER_BG
    } else {
        Color32::TRANSPARENT
    }
}

fn label_color(selected: bool) -> Color32 {
    if selected { Color32::WHITE } else { theme::TEXT }
}

fn text_width(ui: &Ui, label: &str, font: &FontId) -> f32 {
    ui.painter()
        .layout_no_wrap(label.to_owned(), font.clone(), theme::TEXT)
        .size()
        .x
}

/// A labelled tool toggle, solid blue when active.
pub struct ToolButton<'a> {
    label: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
}

impl<'a> ToolButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            shortcut: None,
            selected,
        }
    }

    /// Set keyboard shortcut (shown in hover tooltip).
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font = FontId::proportional(13.0);
        let width = text_width(ui, self.label, &font) + 20.0;
        let (rect, response) = ui.allocate_exact_size(vec2(width, sizing::MEDIUM), Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(
                rect,
                CornerRadius::same(6),
                button_background(self.selected, &response),
            );
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font,
                label_color(self.selected),
            );
        }

        let clicked = response.clicked();
        let tooltip = match self.shortcut {
            Some(key) => format!("{} ({key})", self.label),
            None => self.label.to_owned(),
        };
        response
            .on_hover_text(tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A bordered text button that can be disabled.
pub struct ActionButton<'a> {
    label: &'a str,
    enabled: bool,
    tooltip: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            tooltip: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font = FontId::proportional(12.0);
        let width = text_width(ui, self.label, &font) + 16.0;
        let sense = if self.enabled {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(vec2(width, 24.0), sense);

        if ui.is_rect_visible(rect) {
            let bg = if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg);
            ui.painter().rect_stroke(
                rect,
                radius,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
            let text_color = if self.enabled {
                theme::TEXT
            } else {
                theme::TEXT_DISABLED
            };
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font, text_color);
        }

        let clicked = self.enabled && response.clicked();
        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// A stroke width button showing a line of that thickness.
pub struct StrokeWidthButton<'a> {
    width: f32,
    tooltip: &'a str,
    selected: bool,
}

impl<'a> StrokeWidthButton<'a> {
    pub fn new(width: f32, tooltip: &'a str, selected: bool) -> Self {
        Self {
            width,
            tooltip,
            selected,
        }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(vec2(28.0, 20.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::from_gray(250)
            };
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg);
            if !self.selected {
                ui.painter().rect_stroke(
                    rect,
                    radius,
                    Stroke::new(1.0, Color32::from_gray(200)),
                    StrokeKind::Inside,
                );
            }

            let y = rect.center().y;
            ui.painter().line_segment(
                [Pos2::new(rect.left() + 6.0, y), Pos2::new(rect.right() - 6.0, y)],
                Stroke::new(self.width.min(6.0), label_color(self.selected)),
            );
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A font size button labelled with the size in points.
pub struct FontSizeButton {
    size: f32,
    selected: bool,
}

impl FontSizeButton {
    pub fn new(size: f32, selected: bool) -> Self {
        Self { size, selected }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(vec2(28.0, 20.0), Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                button_background(self.selected, &response),
            );
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{}", self.size.round() as i32),
                FontId::proportional(11.0),
                label_color(self.selected),
            );
        }

        let clicked = response.clicked();
        response
            .on_hover_text(format!("{} px", self.size))
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
