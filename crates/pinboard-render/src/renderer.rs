//! Render pipeline.

use kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke};
use peniko::Color;
use pinboard_core::canvas::Canvas;
use pinboard_core::selection::handle_positions;
use pinboard_core::shapes::{Element, ElementId, smoothed_path};
use pinboard_core::Bitmap;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Immediate-mode drawing target.
///
/// Geometry passed after [`Surface::set_transform`] is in scene coordinates and
/// must be mapped through that transform by the implementation.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn set_transform(&mut self, transform: Affine);
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color);
    fn draw_image(&mut self, id: ElementId, bitmap: &Bitmap, rect: Rect);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    pub canvas: &'a Canvas,
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Padding between an element and its selection outline, in screen pixels.
    pub const SELECTION_PADDING: f64 = 5.0;
    /// Visual radius of resize handles, in screen pixels.
    pub const HANDLE_RADIUS: f64 = 5.0;
    const DASH: f64 = 5.0;

    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            background_color: Color::WHITE,
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// One screen pixel in scene units.
    fn pixel(&self) -> f64 {
        1.0 / self.canvas.camera.scale
    }

    fn dashed(&self) -> Stroke {
        let px = self.pixel();
        Stroke::new(px).with_dashes(0.0, [Self::DASH * px, Self::DASH * px])
    }
}

fn pen_stroke(width: f64) -> Stroke {
    Stroke::new(width)
        .with_caps(Cap::Round)
        .with_join(Join::Round)
}

/// Redraw the whole scene.
///
/// Text and sticky notes belong to the overlay layer and are skipped. Images
/// whose bitmap is not ready are skipped until a later redraw.
pub fn redraw(ctx: &RenderContext, surface: &mut dyn Surface) {
    let canvas = ctx.canvas;
    surface.clear(ctx.background_color);
    surface.set_transform(canvas.camera.transform());

    for element in canvas.scene().iter() {
        draw_element(ctx, element, surface);
    }

    if let Some(selected) = canvas.selected_element() {
        draw_selection(ctx, selected, surface);
    }
    draw_preview(ctx, surface);
}

fn draw_element(ctx: &RenderContext, element: &Element, surface: &mut dyn Surface) {
    match element {
        Element::Path(path) => {
            if path.len() >= 2 {
                surface.stroke_path(&path.to_path(), &pen_stroke(path.stroke_width), path.color.into());
            }
        }
        Element::Rectangle(rect) => {
            surface.fill_rect(rect.as_rect(), rect.color.with_opacity(rect.opacity).into());
        }
        Element::Image(image) => {
            if let Some(bitmap) = ctx.canvas.bitmaps().get(image.id()) {
                surface.draw_image(image.id(), bitmap, image.as_rect());
            }
        }
        Element::Text(_) | Element::StickyNote(_) => {}
    }
}

fn draw_selection(ctx: &RenderContext, element: &Element, surface: &mut dyn Surface) {
    if element.is_overlay() {
        return;
    }
    let px = ctx.pixel();
    let bounds = element.bounds();
    let pad = RenderContext::SELECTION_PADDING * px;
    surface.stroke_rect(bounds.inflate(pad, pad), &ctx.dashed(), ctx.selection_color);

    if element.is_resizable() {
        for (_, position) in handle_positions(bounds) {
            surface.fill_circle(position, RenderContext::HANDLE_RADIUS * px, ctx.selection_color);
        }
    }
}

fn draw_preview(ctx: &RenderContext, surface: &mut dyn Surface) {
    let canvas = ctx.canvas;
    let gesture = canvas.gesture();
    if let Some(path) = gesture.pending_path() {
        if path.len() >= 2 {
            let curve = smoothed_path(&path.points);
            surface.stroke_path(&curve, &pen_stroke(path.stroke_width), path.color.into());
        }
    }
    if let Some(rect) = gesture.shape_preview() {
        surface.stroke_rect(rect, &ctx.dashed(), canvas.config.rectangle_color.into());
    }
}
