//! Camera module for pan/zoom transforms.

use crate::config::WhiteboardConfig;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// Scene coordinates map to screen coordinates as `screen = scene * scale + offset`.
/// The offset is expressed in screen pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current scale factor.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_zoom: f64,
    /// Maximum allowed scale.
    pub max_zoom: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&WhiteboardConfig::default())
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an identity camera with the zoom limits of `config`.
    ///
    /// The config is sanitized first, so the limits are always ordered.
    pub fn from_config(config: &WhiteboardConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
        }
    }

    /// Get the affine transform for rendering (translate, then scale).
    ///
    /// This transform converts scene coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to scene coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a scene point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a scene rectangle to screen coordinates.
    pub fn rect_to_screen(&self, rect: kurbo::Rect) -> kurbo::Rect {
        kurbo::Rect::from_points(
            self.world_to_screen(Point::new(rect.x0, rect.y0)),
            self.world_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Pan the camera by a raw screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the scene point under `cursor` fixed on screen.
    ///
    /// The resulting scale is clamped to `[min_zoom, max_zoom]`.
    pub fn zoom_at(&mut self, cursor: Point, factor: f64) {
        let new_scale = (self.scale * factor).max(self.min_zoom).min(self.max_zoom);
        if !new_scale.is_finite() || new_scale <= 0.0 || (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }
        let anchor = cursor.to_vec2() - self.offset;
        self.offset -= anchor * ((new_scale - self.scale) / self.scale);
        self.scale = new_scale;
    }

    /// One wheel step: positive `delta_y` zooms out, anything else zooms in.
    pub fn zoom_wheel(&mut self, cursor: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            self.zoom_out_factor
        } else {
            self.zoom_in_factor
        };
        self.zoom_at(cursor, factor);
    }

    /// Reset camera to identity scale and zero offset.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }
}
