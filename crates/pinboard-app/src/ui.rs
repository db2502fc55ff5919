//! Toolbar, options bar and overlay editors.

use egui::{
    Color32, CornerRadius, FontId, Frame, Id, Margin, Order, Painter, Pos2, Stroke,
    StrokeKind, TextEdit, Vec2, vec2,
};
use kurbo::Size;
use pinboard_core::images::BitmapSlot;
use pinboard_core::options_bar::OptionsBar;
use pinboard_core::shapes::{Element, FontFamily, SerializableColor};
use pinboard_core::{
    Canvas, ElementId, OverlayKind, OverlayNode, PropertyEdit, PropertyKind, SaveIndicator,
    ToolKind, UserPrompt, overlay_nodes,
};
use pinboard_widgets::{
    ActionButton, ColorSwatch, FontSizeButton, NOTE_COLORS, PEN_COLORS, StrokeWidthButton,
    ToolButton, colors_match, panel_frame, section_label, theme, toolbar_frame,
    vertical_separator,
};

/// Padding inside sticky notes, in scene units.
const NOTE_PADDING: f64 = 8.0;

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetTool(ToolKind),
    SetPenColor(SerializableColor),
    SetStrokeWidth(f64),
    Property(PropertyEdit),
    BringToFront,
    SendToBack,
    DeleteSelected,
    RetryImage(ElementId),
    InsertImage,
    PasteImage,
    CopySelection,
    ClearBoard,
    Save,
}

/// UI state that persists across frames.
#[derive(Debug)]
pub struct UiState {
    /// Last measured size of the options bar.
    pub options_bar_size: Vec2,
    /// Overlay editor that has already been handed keyboard focus.
    pub editor_focus: Option<ElementId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            options_bar_size: vec2(280.0, 36.0),
            editor_focus: None,
        }
    }
}

pub fn color32(color: SerializableColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn serializable(color: Color32) -> SerializableColor {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    SerializableColor::new(r, g, b, a)
}

fn egui_family(family: FontFamily) -> egui::FontFamily {
    match family {
        FontFamily::Mono => egui::FontFamily::Monospace,
        FontFamily::Sans | FontFamily::Serif => egui::FontFamily::Proportional,
    }
}

pub fn tool_hotkey(tool: ToolKind) -> (egui::Key, &'static str) {
    match tool {
        ToolKind::Select => (egui::Key::V, "V"),
        ToolKind::Pen => (egui::Key::P, "P"),
        ToolKind::Shape => (egui::Key::R, "R"),
        ToolKind::Text => (egui::Key::T, "T"),
        ToolKind::Note => (egui::Key::N, "N"),
    }
}

/// Confirmation and alert dialogs shown with native message boxes.
#[derive(Debug, Default)]
pub struct DialogPrompt;

impl UserPrompt for DialogPrompt {
    fn confirm(&self, message: &str) -> bool {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Pinboard")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::OkCancel)
            .show();
        matches!(result, rfd::MessageDialogResult::Ok)
    }

    fn alert(&self, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Pinboard")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Top toolbar.
pub fn toolbar(ui: &mut egui::Ui, canvas: &Canvas, save: &SaveIndicator) -> Vec<UiAction> {
    let mut actions = Vec::new();
    toolbar_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            for tool in ToolKind::ALL {
                let (_, label) = tool_hotkey(tool);
                if ToolButton::new(tool.display_name(), canvas.tool() == tool)
                    .shortcut(label)
                    .show(ui)
                {
                    actions.push(UiAction::SetTool(tool));
                }
            }

            vertical_separator(ui);
            section_label(ui, "Pen");
            let current = color32(canvas.pen_color);
            for (name, color) in PEN_COLORS {
                let (clicked, _) = ColorSwatch::new(*color, name)
                    .selected(colors_match(current, *color))
                    .show(ui);
                if clicked {
                    actions.push(UiAction::SetPenColor(serializable(*color)));
                }
            }
            let mut picked = current;
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut picked,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                actions.push(UiAction::SetPenColor(serializable(picked)));
            }

            vertical_separator(ui);
            for width in OptionsBar::STROKE_WIDTHS {
                let tooltip = format!("{width} px");
                let selected = (canvas.stroke_width - width).abs() < f64::EPSILON;
                if StrokeWidthButton::new(width as f32, &tooltip, selected).show(ui) {
                    actions.push(UiAction::SetStrokeWidth(width));
                }
            }

            vertical_separator(ui);
            if ActionButton::new("Insert image").show(ui) {
                actions.push(UiAction::InsertImage);
            }
            if ActionButton::new("Paste image")
                .tooltip("Paste an image from the clipboard")
                .show(ui)
            {
                actions.push(UiAction::PasteImage);
            }
            if ActionButton::new("Clear board")
                .enabled(!canvas.scene().is_empty())
                .show(ui)
            {
                actions.push(UiAction::ClearBoard);
            }
            if ActionButton::new(save.label())
                .enabled(save.is_enabled())
                .show(ui)
            {
                actions.push(UiAction::Save);
            }
        });
    });
    actions
}

fn element_color(element: &Element) -> Option<SerializableColor> {
    match element {
        Element::Path(p) => Some(p.color),
        Element::Rectangle(r) => Some(r.color),
        Element::Text(t) => Some(t.color),
        Element::Image(_) | Element::StickyNote(_) => None,
    }
}

fn property_editor(
    ui: &mut egui::Ui,
    element: &Element,
    kind: PropertyKind,
) -> Option<PropertyEdit> {
    let mut edit = None;
    match kind {
        PropertyKind::Color => {
            let current = element_color(element).map(color32);
            for (name, color) in PEN_COLORS {
                let selected = current.is_some_and(|c| colors_match(c, *color));
                if ColorSwatch::new(*color, name).selected(selected).show(ui).0 {
                    edit = Some(PropertyEdit::Color(serializable(*color)));
                }
            }
        }
        PropertyKind::StrokeWidth => {
            let Element::Path(path) = element else {
                return None;
            };
            for width in OptionsBar::STROKE_WIDTHS {
                let tooltip = format!("{width} px");
                let selected = (path.stroke_width - width).abs() < f64::EPSILON;
                if StrokeWidthButton::new(width as f32, &tooltip, selected).show(ui) {
                    edit = Some(PropertyEdit::StrokeWidth(width));
                }
            }
        }
        PropertyKind::Opacity => {
            let Element::Rectangle(rect) = element else {
                return None;
            };
            let mut opacity = rect.opacity;
            if ui
                .add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"))
                .changed()
            {
                edit = Some(PropertyEdit::Opacity(opacity));
            }
        }
        PropertyKind::FontFamily => {
            let Element::Text(text) = element else {
                return None;
            };
            for family in FontFamily::all() {
                if ToolButton::new(family.display_name(), text.font_family == *family).show(ui) {
                    edit = Some(PropertyEdit::FontFamily(*family));
                }
            }
        }
        PropertyKind::FontSize => {
            let current = match element {
                Element::Text(t) => t.font_size,
                Element::StickyNote(n) => n.font_size,
                _ => return None,
            };
            for size in OptionsBar::FONT_SIZES {
                let selected = (current - size).abs() < f64::EPSILON;
                if FontSizeButton::new(size as f32, selected).show(ui) {
                    edit = Some(PropertyEdit::FontSize(size));
                }
            }
        }
        PropertyKind::BackgroundColor => {
            let Element::StickyNote(note) = element else {
                return None;
            };
            let current = color32(note.background_color);
            for (name, color) in NOTE_COLORS {
                let selected = colors_match(current, *color);
                if ColorSwatch::new(*color, name).square().selected(selected).show(ui).0 {
                    edit = Some(PropertyEdit::BackgroundColor(serializable(*color)));
                }
            }
        }
    }
    edit
}

/// Floating property editor above (or below) the selected element.
pub fn options_bar(
    ctx: &egui::Context,
    canvas: &Canvas,
    origin: Pos2,
    state: &mut UiState,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    if !canvas.gesture().is_idle() {
        return actions;
    }
    let Some(element) = canvas.selected_element() else {
        return actions;
    };
    let panel = Size::new(
        state.options_bar_size.x as f64,
        state.options_bar_size.y as f64,
    );
    let Some(position) = canvas.options_bar_position(panel) else {
        return actions;
    };

    let response = egui::Area::new(Id::new("options-bar"))
        .order(Order::Foreground)
        .fixed_pos(origin + vec2(position.x as f32, position.y as f32))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    for kind in OptionsBar::editors_for(element) {
                        if let Some(edit) = property_editor(ui, element, *kind) {
                            actions.push(UiAction::Property(edit));
                        }
                        vertical_separator(ui);
                    }
                    let failed = matches!(
                        canvas.bitmaps().slot(element.id()),
                        Some(BitmapSlot::Failed(_))
                    );
                    if failed
                        && ActionButton::new("Retry")
                            .tooltip("Load the image again")
                            .show(ui)
                    {
                        actions.push(UiAction::RetryImage(element.id()));
                    }
                    if ActionButton::new("Front").tooltip("Bring to front").show(ui) {
                        actions.push(UiAction::BringToFront);
                    }
                    if ActionButton::new("Back").tooltip("Send to back").show(ui) {
                        actions.push(UiAction::SendToBack);
                    }
                    if ActionButton::new("Delete").show(ui) {
                        actions.push(UiAction::DeleteSelected);
                    }
                });
            });
        });
    state.options_bar_size = response.response.rect.size();
    actions
}

/// Draw text and sticky notes over the canvas, with an editor on the focused one.
pub fn overlays(
    ctx: &egui::Context,
    painter: &Painter,
    canvas: &mut Canvas,
    origin: Pos2,
    state: &mut UiState,
) {
    if canvas.focused() != state.editor_focus {
        state.editor_focus = None;
    }
    let scale = canvas.camera.scale;
    for node in overlay_nodes(canvas) {
        let rect = egui::Rect::from_min_max(
            origin + vec2(node.rect.x0 as f32, node.rect.y0 as f32),
            origin + vec2(node.rect.x1 as f32, node.rect.y1 as f32),
        );
        let font = FontId::new(node.font_size as f32, egui_family(node.font_family));
        let pad = match node.kind {
            OverlayKind::Note => (NOTE_PADDING * scale) as f32,
            OverlayKind::Text => 0.0,
        };

        if node.kind == OverlayKind::Text && !node.content.trim().is_empty() {
            let galley = painter.layout_no_wrap(node.content.clone(), font.clone(), Color32::BLACK);
            let size = galley.size();
            canvas.set_measured_size(
                node.id,
                Size::new(size.x as f64 / scale, size.y as f64 / scale),
            );
        }

        if node.focused {
            overlay_editor(ctx, canvas, &node, rect, font, pad, state);
        } else {
            paint_overlay(painter, &node, rect, font, pad);
        }
    }
}

fn paint_overlay(painter: &Painter, node: &OverlayNode, rect: egui::Rect, font: FontId, pad: f32) {
    let radius = CornerRadius::same(4);
    if let Some(background) = node.background {
        painter.rect_filled(rect, radius, color32(background));
    }
    let color = color32(node.color);
    let galley = match node.kind {
        OverlayKind::Note => {
            painter.layout(node.content.clone(), font, color, (rect.width() - 2.0 * pad).max(1.0))
        }
        OverlayKind::Text => painter.layout_no_wrap(node.content.clone(), font, color),
    };
    painter.galley(rect.min + vec2(pad, pad), galley, color);
    if node.selected {
        painter.rect_stroke(
            rect.expand(2.0),
            radius,
            Stroke::new(1.0, theme::ACCENT),
            StrokeKind::Outside,
        );
    }
}

fn overlay_editor(
    ctx: &egui::Context,
    canvas: &mut Canvas,
    node: &OverlayNode,
    rect: egui::Rect,
    font: FontId,
    pad: f32,
    state: &mut UiState,
) {
    let mut content = node.content.clone();
    let width = match node.kind {
        OverlayKind::Note => rect.width() - 2.0 * pad,
        OverlayKind::Text => rect.width().max(40.0) + font.size,
    };
    let frame = match node.background {
        Some(background) => Frame::new()
            .fill(color32(background))
            .corner_radius(CornerRadius::same(4))
            .inner_margin(Margin::same(pad.round() as i8)),
        None => Frame::new(),
    };

    let area = egui::Area::new(Id::new(("overlay-editor", node.id)))
        .order(Order::Foreground)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.set_min_size(rect.size());
            frame
                .show(ui, |ui| {
                    ui.add(
                        TextEdit::multiline(&mut content)
                            .font(font)
                            .text_color(color32(node.color))
                            .frame(false)
                            .margin(Margin::ZERO)
                            .desired_width(width)
                            .desired_rows(1)
                            .hint_text("Type here"),
                    )
                })
                .inner
        });
    let response = area.inner;

    if state.editor_focus != Some(node.id) {
        response.request_focus();
        state.editor_focus = Some(node.id);
    }
    if response.changed() {
        canvas.set_overlay_text(node.id, &content);
    }
    if response.lost_focus() {
        canvas.blur_overlay();
        state.editor_focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_roundtrip() {
        let color = SerializableColor::new(12, 34, 56, 255);
        assert_eq!(serializable(color32(color)), color);
    }

    #[test]
    fn test_tool_hotkeys_unique() {
        let mut keys: Vec<_> = ToolKind::ALL.iter().map(|t| tool_hotkey(*t).1).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), ToolKind::ALL.len());
    }

    #[test]
    fn test_ui_state_default_panel_size() {
        let state = UiState::default();
        assert!(state.options_bar_size.x > 0.0);
        assert!(state.editor_focus.is_none());
    }
}
