//! Element definitions for the whiteboard.

mod image;
mod note;
mod path;
mod rectangle;
mod text;

pub use image::{Image, fit_within};
pub use note::StickyNote;
pub use path::{Path, smoothed_path};
pub use rectangle::Rectangle;
pub use text::{FontFamily, Text, escape_html};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with its alpha multiplied by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }

    /// `#rrggbb` notation (alpha dropped).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Tolerances for one hit-test query, already converted to scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParams {
    /// Minimum hit radius around path segments.
    pub path_threshold: f64,
    /// Added to a path's stroke width for its hit radius.
    pub path_margin: f64,
    /// Tolerance around bounding boxes.
    pub buffer: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            path_threshold: 20.0,
            path_margin: 10.0,
            buffer: 5.0,
        }
    }
}

/// Every drawable thing on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Path(Path),
    Rectangle(Rectangle),
    Image(Image),
    Text(Text),
    #[serde(rename = "note")]
    StickyNote(StickyNote),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Path(s) => s.id(),
            Element::Rectangle(s) => s.id(),
            Element::Image(s) => s.id(),
            Element::Text(s) => s.id(),
            Element::StickyNote(s) => s.id(),
        }
    }

    /// Normalized bounding box in scene coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Path(s) => s.bounds(),
            Element::Rectangle(s) => s.as_rect(),
            Element::Image(s) => s.as_rect(),
            Element::Text(s) => s.bounds(),
            Element::StickyNote(s) => s.bounds(),
        }
    }

    /// Check if a scene point hits this element.
    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        match self {
            Element::Path(s) => s.hit_test(point, params),
            Element::Rectangle(s) => s.hit_test(point, params),
            Element::Image(s) => s.hit_test(point, params),
            Element::Text(s) => s.hit_test(point, params),
            Element::StickyNote(s) => s.hit_test(point, params),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Path(s) => s.translate(delta),
            Element::Rectangle(s) => s.translate(delta),
            Element::Image(s) => s.translate(delta),
            Element::Text(s) => s.translate(delta),
            Element::StickyNote(s) => s.translate(delta),
        }
    }

    /// Anchor point used for offset-based dragging.
    ///
    /// Paths have no single anchor and report their first point.
    pub fn origin(&self) -> Point {
        match self {
            Element::Path(s) => s.points.first().copied().unwrap_or(Point::ZERO),
            Element::Rectangle(s) => s.origin(),
            Element::Image(s) => s.origin(),
            Element::Text(s) => s.origin(),
            Element::StickyNote(s) => s.origin(),
        }
    }

    /// Move the anchor to `origin`. Paths are shifted as a whole.
    pub fn set_origin(&mut self, origin: Point) {
        match self {
            Element::Path(s) => {
                if let Some(first) = s.points.first().copied() {
                    s.translate(origin - first);
                }
            }
            Element::Rectangle(s) => s.set_origin(origin),
            Element::Image(s) => s.set_origin(origin),
            Element::Text(s) => s.set_origin(origin),
            Element::StickyNote(s) => s.set_origin(origin),
        }
    }

    /// Elements presented by the overlay surface rather than the drawing surface.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Element::Text(_) | Element::StickyNote(_))
    }

    /// Elements that expose edge resize handles when selected.
    pub fn is_resizable(&self) -> bool {
        matches!(self, Element::Rectangle(_) | Element::Image(_))
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Element::Image(img) => Some(img),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}
