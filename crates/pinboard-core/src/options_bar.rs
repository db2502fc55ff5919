//! Floating property editor for the selected element.

use crate::shapes::{Element, FontFamily, SerializableColor};
use kurbo::{Point, Rect, Size};

/// One editable property shown in the options bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    StrokeWidth,
    Opacity,
    FontFamily,
    FontSize,
    BackgroundColor,
}

/// A property edit coming from the options bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyEdit {
    Color(SerializableColor),
    StrokeWidth(f64),
    Opacity(f64),
    FontFamily(FontFamily),
    FontSize(f64),
    BackgroundColor(SerializableColor),
}

impl PropertyEdit {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyEdit::Color(_) => PropertyKind::Color,
            PropertyEdit::StrokeWidth(_) => PropertyKind::StrokeWidth,
            PropertyEdit::Opacity(_) => PropertyKind::Opacity,
            PropertyEdit::FontFamily(_) => PropertyKind::FontFamily,
            PropertyEdit::FontSize(_) => PropertyKind::FontSize,
            PropertyEdit::BackgroundColor(_) => PropertyKind::BackgroundColor,
        }
    }
}

/// Stateless layout and binding rules for the options bar.
pub struct OptionsBar;

impl OptionsBar {
    pub const MIN_STROKE_WIDTH: f64 = 0.5;
    pub const MIN_FONT_SIZE: f64 = 6.0;
    pub const STROKE_WIDTHS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];
    pub const FONT_SIZES: [f64; 6] = [12.0, 14.0, 16.0, 20.0, 28.0, 40.0];

    /// Editors available for an element type.
    pub fn editors_for(element: &Element) -> &'static [PropertyKind] {
        match element {
            Element::Path(_) => &[PropertyKind::Color, PropertyKind::StrokeWidth],
            Element::Rectangle(_) => &[PropertyKind::Color, PropertyKind::Opacity],
            Element::Image(_) => &[],
            Element::Text(_) => &[
                PropertyKind::FontFamily,
                PropertyKind::FontSize,
                PropertyKind::Color,
            ],
            Element::StickyNote(_) => &[PropertyKind::BackgroundColor, PropertyKind::FontSize],
        }
    }

    /// Top-left corner of the panel in container coordinates.
    ///
    /// Centered over `target` and placed `margin` above it, or below when it
    /// would leave the top of the container. Horizontally clamped to keep
    /// `margin` from the container edges.
    pub fn position(target: Rect, panel: Size, container: Size, margin: f64) -> Point {
        let target = target.abs();
        let mut x = target.center().x - panel.width / 2.0;
        let mut y = target.y0 - panel.height - margin;
        if y < 0.0 {
            y = target.y1 + margin;
        }

        let max_x = container.width - panel.width - margin;
        x = x.min(max_x).max(margin);
        Point::new(x, y)
    }

    /// Write `edit` into `element`. Returns false when the element has no such property.
    pub fn apply(element: &mut Element, edit: PropertyEdit) -> bool {
        match (element, edit) {
            (Element::Path(p), PropertyEdit::Color(c)) => p.color = c,
            (Element::Path(p), PropertyEdit::StrokeWidth(w)) => {
                p.stroke_width = w.max(Self::MIN_STROKE_WIDTH)
            }
            (Element::Rectangle(r), PropertyEdit::Color(c)) => r.color = c,
            (Element::Rectangle(r), PropertyEdit::Opacity(o)) => r.opacity = o.clamp(0.0, 1.0),
            (Element::Text(t), PropertyEdit::Color(c)) => t.color = c,
            (Element::Text(t), PropertyEdit::FontFamily(f)) => {
                t.font_family = f;
                t.invalidate_measurement();
            }
            (Element::Text(t), PropertyEdit::FontSize(s)) => {
                t.font_size = s.max(Self::MIN_FONT_SIZE);
                t.invalidate_measurement();
            }
            (Element::StickyNote(n), PropertyEdit::BackgroundColor(c)) => n.background_color = c,
            (Element::StickyNote(n), PropertyEdit::FontSize(s)) => {
                n.font_size = s.max(Self::MIN_FONT_SIZE)
            }
            _ => return false,
        }
        true
    }
}
