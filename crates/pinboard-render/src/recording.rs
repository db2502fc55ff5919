//! A [`Surface`] that records draw calls instead of rasterizing them.

use crate::renderer::Surface;
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use peniko::Color;
use pinboard_core::Bitmap;
use pinboard_core::shapes::{ElementId, SerializableColor};

/// One recorded draw call. Colors are stored as RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(SerializableColor),
    SetTransform(Affine),
    StrokePath {
        path: BezPath,
        width: f64,
        color: SerializableColor,
    },
    FillRect {
        rect: Rect,
        color: SerializableColor,
    },
    StrokeRect {
        rect: Rect,
        width: f64,
        dashed: bool,
        color: SerializableColor,
    },
    DrawImage {
        id: ElementId,
        rect: Rect,
        pixel_size: (u32, u32),
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: SerializableColor,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|cmd| pred(cmd)).count()
    }

    /// Filled rectangles in draw order.
    pub fn fill_rects(&self) -> Vec<(Rect, SerializableColor)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Images in draw order.
    pub fn images(&self) -> Vec<ElementId> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawImage { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color.into()));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            width: stroke.width,
            color: color.into(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.into(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            width: stroke.width,
            dashed: !stroke.dash_pattern.is_empty(),
            color: color.into(),
        });
    }

    fn draw_image(&mut self, id: ElementId, bitmap: &Bitmap, rect: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            id,
            rect,
            pixel_size: (bitmap.width, bitmap.height),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: color.into(),
        });
    }
}
