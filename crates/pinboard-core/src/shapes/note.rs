//! Sticky note shape.

use super::{ElementId, HitParams, SerializableColor};
use crate::geometry::rect_contains_with_buffer;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fixed-size square note with free text, edited through the overlay surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: String,
    pub background_color: SerializableColor,
    pub font_size: f64,
}

impl StickyNote {
    /// Edge length of a newly created note.
    pub const DEFAULT_SIZE: f64 = 200.0;

    pub fn new(origin: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            content: String::new(),
            background_color: SerializableColor::new(254, 240, 138, 255),
            font_size: 14.0,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.width = size;
        self.height = size;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin(), Size::new(self.width, self.height))
    }

    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        rect_contains_with_buffer(self.bounds(), point, params.buffer)
    }

    /// Content escaped for HTML, newlines as `<br>`.
    pub fn to_html(&self) -> String {
        super::text::html_lines(&self.content)
    }
}
