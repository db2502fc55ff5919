//! Image shape for embedding raster images.

use super::{ElementId, HitParams};
use crate::geometry::{normalized_rect, rect_contains_with_buffer};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image placed on the board.
///
/// Only the source reference is persisted; the decoded bitmap lives in the
/// canvas' bitmap cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `blob:<asset>`, `data:` URL or file path.
    pub source_ref: String,
}

impl Image {
    pub fn new(origin: Point, size: Size, source_ref: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            source_ref: source_ref.into(),
        }
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

    pub fn as_rect(&self) -> Rect {
        normalized_rect(self.origin(), self.width, self.height)
    }

    /// Width divided by height, or 1 for a degenerate image.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height.abs() < f64::EPSILON {
            1.0
        } else {
            (self.width / self.height).abs()
        }
    }

    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        rect_contains_with_buffer(self.as_rect(), point, params.buffer)
    }
}

/// Scale `size` down to fit inside a `max`×`max` square, keeping its aspect ratio.
pub fn fit_within(size: Size, max: f64) -> Size {
    if size.width <= max && size.height <= max {
        return size;
    }
    let factor = (max / size.width).min(max / size.height);
    Size::new(size.width * factor, size.height * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let img = Image::new(Point::ZERO, Size::new(200.0, 100.0), "blob:a");
        assert!((img.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_within() {
        let fitted = fit_within(Size::new(800.0, 400.0), 400.0);
        assert!((fitted.width - 400.0).abs() < f64::EPSILON);
        assert!((fitted.height - 200.0).abs() < f64::EPSILON);

        let small = fit_within(Size::new(40.0, 30.0), 400.0);
        assert_eq!(small, Size::new(40.0, 30.0));
    }

    #[test]
    fn test_hit_test() {
        let img = Image::new(Point::new(10.0, 10.0), Size::new(50.0, 50.0), "blob:a");
        assert!(img.hit_test(Point::new(30.0, 30.0), &HitParams::default()));
        assert!(!img.hit_test(Point::new(80.0, 30.0), &HitParams::default()));
    }
}
