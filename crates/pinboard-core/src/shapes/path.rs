//! Freehand pen stroke.

use super::{ElementId, HitParams, SerializableColor};
use crate::geometry::{point_to_polyline_dist, point_to_segment_dist, points_bounds};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pen stroke: an ordered list of scene-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub(crate) id: ElementId,
    /// Points in the stroke.
    pub points: Vec<Point>,
    pub color: SerializableColor,
    pub stroke_width: f64,
}

impl Path {
    /// Start a stroke at a single point.
    pub fn new(start: Point, color: SerializableColor, stroke_width: f64) -> Self {
        Self::from_points(vec![start], color, stroke_width)
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            stroke_width,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Simplify the stroke by removing redundant points.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }
        self.points = rdp_simplify(&self.points, tolerance);
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    pub fn bounds(&self) -> Rect {
        points_bounds(&self.points).unwrap_or(Rect::ZERO)
    }

    /// Radius within which a query point counts as touching this stroke.
    pub fn hit_radius(&self, params: &HitParams) -> f64 {
        params
            .path_threshold
            .max(self.stroke_width + params.path_margin)
    }

    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        point_to_polyline_dist(point, &self.points) <= self.hit_radius(params)
    }

    /// Smoothed outline used for drawing.
    ///
    /// Interior points act as quadratic control points with the curve passing
    /// through the midpoints between neighbours, so the stroke has no corners.
    pub fn to_path(&self) -> BezPath {
        smoothed_path(&self.points)
    }
}

/// Build the smoothed curve through `points`.
///
/// Fewer than three points produce straight segments.
pub fn smoothed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    if points.len() < 3 {
        for point in rest {
            path.line_to(*point);
        }
        return path;
    }
    let last = points.len() - 1;
    for i in 1..last {
        let control = points[i];
        let next = points[i + 1];
        path.quad_to(control, control.midpoint(next));
    }
    path.line_to(points[last]);
    path
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = point_to_segment_dist(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn stroke(points: &[(f64, f64)], width: f64) -> Path {
        Path::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            SerializableColor::black(),
            width,
        )
    }

    #[test]
    fn test_add_points() {
        let mut path = Path::new(Point::ZERO, SerializableColor::black(), 2.0);
        path.add_point(Point::new(10.0, 10.0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let path = stroke(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)], 2.0);
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_simplify() {
        let mut path = stroke(
            &[(0.0, 0.0), (1.0, 0.1), (2.0, 0.0), (3.0, 0.1), (4.0, 0.0)],
            2.0,
        );
        path.simplify(0.5);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_hit_radius_uses_threshold_for_thin_strokes() {
        let params = HitParams::default();
        let thin = stroke(&[(0.0, 0.0), (100.0, 0.0)], 2.0);
        assert!((thin.hit_radius(&params) - 20.0).abs() < f64::EPSILON);
        assert!(thin.hit_test(Point::new(50.0, 19.5), &params));
        assert!(!thin.hit_test(Point::new(50.0, 20.5), &params));

        let thick = stroke(&[(0.0, 0.0), (100.0, 0.0)], 16.0);
        assert!((thick.hit_radius(&params) - 26.0).abs() < f64::EPSILON);
        assert!(thick.hit_test(Point::new(50.0, 25.0), &params));
    }

    #[test]
    fn test_single_point_never_hits() {
        let dot = stroke(&[(0.0, 0.0)], 2.0);
        assert!(!dot.hit_test(Point::ZERO, &HitParams::default()));
    }

    #[test]
    fn test_smoothing_two_points_is_straight() {
        let path = smoothed_path(&[Point::ZERO, Point::new(10.0, 0.0)]);
        let els: Vec<_> = path.elements().to_vec();
        assert_eq!(els, vec![PathEl::MoveTo(Point::ZERO), PathEl::LineTo(Point::new(10.0, 0.0))]);
    }

    #[test]
    fn test_smoothing_uses_midpoints() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
        ];
        let els: Vec<_> = smoothed_path(&pts).elements().to_vec();
        assert_eq!(
            els,
            vec![
                PathEl::MoveTo(pts[0]),
                PathEl::QuadTo(pts[1], Point::new(10.0, 5.0)),
                PathEl::QuadTo(pts[2], Point::new(15.0, 10.0)),
                PathEl::LineTo(pts[3]),
            ]
        );
    }
}
