//! Small geometric helpers shared by hit-testing and resizing.

use kurbo::{Point, Rect, Vec2};

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Returns infinity for fewer than two points.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Rectangle from an origin and a signed size.
///
/// Negative width or height extend left/up from the origin.
pub fn normalized_rect(origin: Point, width: f64, height: f64) -> Rect {
    Rect::from_points(origin, origin + Vec2::new(width, height))
}

/// Containment test with a uniform tolerance around the rectangle.
pub fn rect_contains_with_buffer(rect: Rect, point: Point, buffer: f64) -> bool {
    let r = rect.abs().inflate(buffer, buffer);
    point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
}

/// Whether `point` lies within `radius` of `center`.
pub fn within_radius(point: Point, center: Point, radius: f64) -> bool {
    (point - center).hypot2() <= radius * radius
}

/// Axis-aligned bounds of a point set, or `None` if empty.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}
