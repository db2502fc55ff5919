//! Filled rectangle shape.

use super::{ElementId, HitParams, SerializableColor};
use crate::geometry::{normalized_rect, rect_contains_with_buffer};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled rectangle.
///
/// `width` and `height` keep the sign they were drawn with; use
/// [`Rectangle::as_rect`] for a normalized box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Rectangle {
    /// Create a new rectangle anchored at `origin`.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            color: SerializableColor::black(),
            opacity: 1.0,
        }
    }

    pub fn with_fill(mut self, color: SerializableColor, opacity: f64) -> Self {
        self.color = color;
        self.opacity = opacity.clamp(0.0, 1.0);
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

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        normalized_rect(self.origin(), self.width, self.height)
    }

    /// Rewrite the origin and size so both dimensions are positive.
    pub fn normalize(&mut self) {
        let rect = self.as_rect();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        rect_contains_with_buffer(self.as_rect(), point, params.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert_eq!(rect.as_rect(), Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn test_negative_size_is_normalized_for_hits() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), -50.0, -50.0);
        let params = HitParams::default();
        assert!(rect.hit_test(Point::new(75.0, 75.0), &params));
        assert!(!rect.hit_test(Point::new(125.0, 75.0), &params));
    }

    #[test]
    fn test_hit_buffer() {
        let rect = Rectangle::new(Point::ZERO, 100.0, 100.0);
        let mut params = HitParams::default();
        params.buffer = 10.0;
        assert!(rect.hit_test(Point::new(105.0, 50.0), &params));
        assert!(!rect.hit_test(Point::new(115.0, 50.0), &params));
    }

    #[test]
    fn test_normalize() {
        let mut rect = Rectangle::new(Point::new(50.0, 50.0), -20.0, 30.0);
        rect.normalize();
        assert!((rect.x - 30.0).abs() < f64::EPSILON);
        assert!((rect.width - 20.0).abs() < f64::EPSILON);
        assert!((rect.height - 30.0).abs() < f64::EPSILON);
    }
}
