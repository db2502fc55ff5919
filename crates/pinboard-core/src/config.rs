//! Tunable constants for the whiteboard engine.

use crate::shapes::{FontFamily, SerializableColor};
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WhiteboardConfig {
    /// Smallest allowed view scale.
    pub min_zoom: f64,
    /// Largest allowed view scale.
    pub max_zoom: f64,
    /// Scale multiplier applied per wheel step towards the user.
    pub zoom_in_factor: f64,
    /// Scale multiplier applied per wheel step away from the user.
    pub zoom_out_factor: f64,
    /// Minimum hit radius for paths, in scene units.
    pub path_hit_threshold: f64,
    /// Added to a path's stroke width to get its hit radius.
    pub path_hit_margin: f64,
    /// Bounding-box hit tolerance in screen pixels.
    pub hit_buffer: f64,
    /// Resize handle hit radius in screen pixels.
    pub handle_radius: f64,
    /// Smallest width/height a resize step may produce, in scene units.
    pub min_resize: f64,
    /// Rectangles with either side at or below this are discarded.
    pub min_shape_size: f64,
    /// RDP tolerance applied to finished pen strokes.
    pub simplify_tolerance: f64,
    pub pen_color: SerializableColor,
    pub stroke_width: f64,
    pub rectangle_color: SerializableColor,
    pub rectangle_opacity: f64,
    pub text_color: SerializableColor,
    pub font_family: FontFamily,
    pub font_size: f64,
    pub note_size: f64,
    pub note_color: SerializableColor,
    pub note_font_size: f64,
    /// Gap between the options bar and the selected element, in pixels.
    pub options_bar_margin: f64,
    /// Pasted images are scaled down to fit this square.
    pub pasted_image_max: f64,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            path_hit_threshold: 20.0,
            path_hit_margin: 10.0,
            hit_buffer: 5.0,
            handle_radius: 8.0,
            min_resize: 10.0,
            min_shape_size: 2.0,
            simplify_tolerance: 0.5,
            pen_color: SerializableColor::black(),
            stroke_width: 2.0,
            rectangle_color: SerializableColor::new(59, 130, 246, 255),
            rectangle_opacity: 0.5,
            text_color: SerializableColor::black(),
            font_family: FontFamily::default(),
            font_size: 16.0,
            note_size: 200.0,
            note_color: SerializableColor::new(254, 240, 138, 255),
            note_font_size: 14.0,
            options_bar_margin: 10.0,
            pasted_image_max: 400.0,
        }
    }
}

impl WhiteboardConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    ///
    /// The result is [sanitized](Self::sanitized).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace values the engine cannot work with.
    ///
    /// Inverted zoom limits are swapped. Non-finite or non-positive limits,
    /// factors and sizes, and negative or non-finite tolerances, fall back to
    /// their defaults. Opacity is clamped to `[0, 1]`.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        positive(&mut self.min_zoom, defaults.min_zoom, "minZoom");
        positive(&mut self.max_zoom, defaults.max_zoom, "maxZoom");
        if self.min_zoom > self.max_zoom {
            log::warn!(
                "minZoom {} exceeds maxZoom {}, swapping",
                self.min_zoom,
                self.max_zoom
            );
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        positive(&mut self.zoom_in_factor, defaults.zoom_in_factor, "zoomInFactor");
        positive(&mut self.zoom_out_factor, defaults.zoom_out_factor, "zoomOutFactor");

        positive(&mut self.path_hit_threshold, defaults.path_hit_threshold, "pathHitThreshold");
        non_negative(&mut self.path_hit_margin, defaults.path_hit_margin, "pathHitMargin");
        non_negative(&mut self.hit_buffer, defaults.hit_buffer, "hitBuffer");
        positive(&mut self.handle_radius, defaults.handle_radius, "handleRadius");
        positive(&mut self.min_resize, defaults.min_resize, "minResize");
        non_negative(&mut self.min_shape_size, defaults.min_shape_size, "minShapeSize");
        non_negative(&mut self.simplify_tolerance, defaults.simplify_tolerance, "simplifyTolerance");

        positive(&mut self.stroke_width, defaults.stroke_width, "strokeWidth");
        non_negative(&mut self.rectangle_opacity, defaults.rectangle_opacity, "rectangleOpacity");
        self.rectangle_opacity = self.rectangle_opacity.min(1.0);
        positive(&mut self.font_size, defaults.font_size, "fontSize");
        positive(&mut self.note_size, defaults.note_size, "noteSize");
        positive(&mut self.note_font_size, defaults.note_font_size, "noteFontSize");
        non_negative(&mut self.options_bar_margin, defaults.options_bar_margin, "optionsBarMargin");
        positive(&mut self.pasted_image_max, defaults.pasted_image_max, "pastedImageMax");
        self
    }
}

fn positive(value: &mut f64, default: f64, name: &str) {
    if !(value.is_finite() && *value > 0.0) {
        log::warn!("invalid {name} {value}, using {default}");
        *value = default;
    }
}

fn non_negative(value: &mut f64, default: f64, name: &str) {
    if !(value.is_finite() && *value >= 0.0) {
        log::warn!("invalid {name} {value}, using {default}");
        *value = default;
    }
}
