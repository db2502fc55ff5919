//! Resize handles for the selected element.

use crate::geometry::within_radius;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Edge-midpoint handle of a resizable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
    ];

    /// Handle position on a normalized rect.
    pub fn position(self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            ResizeHandle::Left => Point::new(rect.x0, center.y),
            ResizeHandle::Right => Point::new(rect.x1, center.y),
            ResizeHandle::Top => Point::new(center.x, rect.y0),
            ResizeHandle::Bottom => Point::new(center.x, rect.y1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, ResizeHandle::Left | ResizeHandle::Right)
    }
}

/// All four handles with their positions.
pub fn handle_positions(rect: Rect) -> [(ResizeHandle, Point); 4] {
    ResizeHandle::ALL.map(|h| (h, h.position(rect)))
}

/// Find which handle (if any) lies within `radius` of `point`.
pub fn hit_test_handles(rect: Rect, point: Point, radius: f64) -> Option<ResizeHandle> {
    handle_positions(rect)
        .into_iter()
        .find(|(_, pos)| within_radius(point, *pos, radius))
        .map(|(handle, _)| handle)
}

/// Resize `rect` by dragging `handle` to `pointer`.
///
/// The opposite edge stays fixed and the changed dimension is clamped to
/// `min_size`. With `aspect` (width / height) the orthogonal dimension is
/// derived from the changed one, centered on the original axis.
pub fn apply_resize(
    rect: Rect,
    handle: ResizeHandle,
    pointer: Point,
    min_size: f64,
    aspect: Option<f64>,
) -> Rect {
    let mut out = rect;
    match handle {
        ResizeHandle::Left => out.x0 = pointer.x.min(rect.x1 - min_size),
        ResizeHandle::Right => out.x1 = pointer.x.max(rect.x0 + min_size),
        ResizeHandle::Top => out.y0 = pointer.y.min(rect.y1 - min_size),
        ResizeHandle::Bottom => out.y1 = pointer.y.max(rect.y0 + min_size),
    }

    let Some(aspect) = aspect.filter(|a| a.is_finite() && *a > 0.0) else {
        return out;
    };

    let center = rect.center();
    if handle.is_horizontal() {
        let height = (out.width() / aspect).max(min_size);
        out.y0 = center.y - height / 2.0;
        out.y1 = center.y + height / 2.0;
    } else {
        let width = (out.height() * aspect).max(min_size);
        out.x0 = center.x - width / 2.0;
        out.x1 = center.x + width / 2.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_handle_positions() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(ResizeHandle::Left.position(rect), Point::new(0.0, 25.0));
        assert_eq!(ResizeHandle::Right.position(rect), Point::new(100.0, 25.0));
        assert_eq!(ResizeHandle::Top.position(rect), Point::new(50.0, 0.0));
        assert_eq!(ResizeHandle::Bottom.position(rect), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_hit_test_handles() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(
            hit_test_handles(rect, Point::new(103.0, 27.0), 8.0),
            Some(ResizeHandle::Right)
        );
        assert_eq!(hit_test_handles(rect, Point::new(50.0, 25.0), 8.0), None);
    }

    #[test]
    fn test_resize_right_edge() {
        let rect = Rect::new(10.0, 10.0, 110.0, 60.0);
        let out = apply_resize(rect, ResizeHandle::Right, Point::new(150.0, 0.0), 10.0, None);
        assert!((out.x1 - 150.0).abs() < EPS);
        assert!((out.x0 - 10.0).abs() < EPS);
        assert!((out.height() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_resize_min_clamp() {
        let rect = Rect::new(10.0, 10.0, 110.0, 60.0);
        let out = apply_resize(rect, ResizeHandle::Left, Point::new(500.0, 0.0), 10.0, None);
        assert!((out.width() - 10.0).abs() < EPS);
        assert!((out.x1 - 110.0).abs() < EPS);

        let out = apply_resize(rect, ResizeHandle::Top, Point::new(0.0, 100.0), 10.0, None);
        assert!((out.height() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_resize_keeps_aspect() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let out = apply_resize(rect, ResizeHandle::Right, Point::new(100.0, 0.0), 10.0, Some(2.0));
        assert!((out.width() - 100.0).abs() < EPS);
        assert!((out.height() - 50.0).abs() < EPS);

        let out = apply_resize(rect, ResizeHandle::Bottom, Point::new(0.0, 200.0), 10.0, Some(2.0));
        assert!((out.height() - 200.0).abs() < EPS);
        assert!((out.width() - 400.0).abs() < EPS);
    }
}
