//! egui painter backed drawing surface.

use std::collections::HashMap;
use std::sync::Arc;

use egui::{Color32, ColorImage, Painter, Pos2, Shape, TextureHandle, TextureOptions};
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Stroke};
use peniko::Color;
use pinboard_core::{Bitmap, ElementId};
use pinboard_render::Surface;

/// Curve flattening tolerance in screen pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;

pub fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// GPU textures for image elements, keyed by element id.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<ElementId, (Arc<[u8]>, TextureHandle)>,
}

impl TextureCache {
    /// Texture for `bitmap`, uploading it when new or changed.
    fn texture(&mut self, ctx: &egui::Context, id: ElementId, bitmap: &Bitmap) -> &TextureHandle {
        let stale = self
            .textures
            .get(&id)
            .is_none_or(|(pixels, _)| !Arc::ptr_eq(pixels, &bitmap.rgba));
        if stale {
            let image = ColorImage::from_rgba_unmultiplied(
                [bitmap.width as usize, bitmap.height as usize],
                &bitmap.rgba,
            );
            let handle = ctx.load_texture(format!("image-{id}"), image, TextureOptions::LINEAR);
            self.textures.insert(id, (Arc::clone(&bitmap.rgba), handle));
        }
        &self.textures[&id].1
    }

    /// Drop textures whose element is gone.
    pub fn retain(&mut self, keep: impl Fn(ElementId) -> bool) {
        self.textures.retain(|id, _| keep(*id));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.textures.len()
    }
}

/// Draws into an egui painter whose clip rect is the canvas area.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    textures: &'a mut TextureCache,
    /// Canvas origin in egui screen coordinates.
    origin: Pos2,
    transform: Affine,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, textures: &'a mut TextureCache) -> Self {
        Self {
            origin: painter.clip_rect().min,
            painter,
            textures,
            transform: Affine::IDENTITY,
        }
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        let p = self.transform * point;
        Pos2::new(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }

    fn scale(&self) -> f64 {
        self.transform.as_coeffs()[0]
    }

    fn screen_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_two_pos(
            self.to_screen(rect.origin()),
            self.to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    fn egui_stroke(&self, stroke: &Stroke, color: Color) -> egui::Stroke {
        egui::Stroke::new((stroke.width * self.scale()) as f32, to_color32(color))
    }

    fn polyline(&self, points: Vec<Pos2>, stroke: &Stroke, color: Color) {
        if points.len() < 2 {
            return;
        }
        let egui_stroke = self.egui_stroke(stroke, color);
        if stroke.dash_pattern.is_empty() {
            if egui_stroke.width > 2.0 {
                // Round caps
                let radius = egui_stroke.width / 2.0;
                for end in [points[0], points[points.len() - 1]] {
                    self.painter.circle_filled(end, radius, egui_stroke.color);
                }
            }
            self.painter.add(Shape::line(points, egui_stroke));
        } else {
            let dash = (stroke.dash_pattern[0] * self.scale()) as f32;
            let gap = stroke
                .dash_pattern
                .get(1)
                .map_or(dash, |gap| (*gap * self.scale()) as f32);
            self.painter
                .extend(Shape::dashed_line(&points, egui_stroke, dash, gap));
        }
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, to_color32(color));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        let tolerance = FLATTEN_TOLERANCE / self.scale().max(f64::EPSILON);
        let mut lines: Vec<Vec<Pos2>> = Vec::new();
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => lines.push(vec![self.to_screen(p)]),
            PathEl::LineTo(p) => {
                if let Some(line) = lines.last_mut() {
                    line.push(self.to_screen(p));
                }
            }
            PathEl::ClosePath => {
                if let Some(line) = lines.last_mut() {
                    if let Some(first) = line.first().copied() {
                        line.push(first);
                    }
                }
            }
            _ => {}
        });
        for line in lines {
            self.polyline(line, stroke, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(self.screen_rect(rect), 0.0, to_color32(color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) {
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x0, rect.y0),
        ];
        let points = corners.iter().map(|p| self.to_screen(*p)).collect();
        self.polyline(points, stroke, color);
    }

    fn draw_image(&mut self, id: ElementId, bitmap: &Bitmap, rect: Rect) {
        let screen = self.screen_rect(rect);
        let texture = self.textures.texture(self.painter.ctx(), id, bitmap);
        let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        self.painter.image(texture.id(), screen, uv, Color32::WHITE);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.painter.circle_filled(
            self.to_screen(center),
            (radius * self.scale()) as f32,
            to_color32(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32_keeps_channels() {
        let color = to_color32(Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(color, Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_texture_cache_retain() {
        let ctx = egui::Context::default();
        let mut cache = TextureCache::default();
        let keep = ElementId::new_v4();
        let gone = ElementId::new_v4();
        let bitmap = Bitmap::new(1, 1, vec![0u8, 0, 0, 255]);
        cache.texture(&ctx, keep, &bitmap);
        cache.texture(&ctx, gone, &bitmap);
        cache.retain(|id| id == keep);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_texture_reused_for_same_pixels() {
        let ctx = egui::Context::default();
        let mut cache = TextureCache::default();
        let id = ElementId::new_v4();
        let bitmap = Bitmap::new(1, 1, vec![255u8, 0, 0, 255]);
        let first = cache.texture(&ctx, id, &bitmap).id();
        let second = cache.texture(&ctx, id, &bitmap).id();
        assert_eq!(first, second);
    }
}
