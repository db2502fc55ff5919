//! Tool system for the whiteboard.

use crate::selection::ResizeHandle;
use crate::shapes::{ElementId, Path};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Shape,
    Text,
    Note,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Pen,
        ToolKind::Shape,
        ToolKind::Text,
        ToolKind::Note,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Pen => "Pen",
            ToolKind::Shape => "Rectangle",
            ToolKind::Text => "Text",
            ToolKind::Note => "Sticky note",
        }
    }
}

/// The single in-flight pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pen stroke being recorded, not yet part of the scene.
    Drawing { path: Path },
    /// Rectangle preview between the anchor and the current pointer.
    DrawingShape { anchor: Point, current: Point },
    /// Moving an anchored element; `offset` is pointer minus element origin.
    Dragging {
        id: ElementId,
        offset: Vec2,
        moved: bool,
    },
    /// Moving a path by incremental deltas.
    DraggingPath {
        id: ElementId,
        last: Point,
        moved: bool,
    },
    Resizing {
        id: ElementId,
        handle: ResizeHandle,
        start_rect: Rect,
        /// Width / height to preserve (images only).
        aspect: Option<f64>,
    },
    /// Panning the view; tracked in screen space.
    Panning { last_screen: Point },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Element the gesture is operating on, if any.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Gesture::Dragging { id, .. }
            | Gesture::DraggingPath { id, .. }
            | Gesture::Resizing { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Stroke being drawn with the pen.
    pub fn pending_path(&self) -> Option<&Path> {
        match self {
            Gesture::Drawing { path } => Some(path),
            _ => None,
        }
    }

    /// Normalized rectangle preview while drawing a shape.
    pub fn shape_preview(&self) -> Option<Rect> {
        match self {
            Gesture::DrawingShape { anchor, current } => Some(Rect::from_points(*anchor, *current)),
            _ => None,
        }
    }
}

/// Current tool plus the gesture it is driving.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub gesture: Gesture,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.gesture = Gesture::Idle;
    }

    /// End the gesture and hand back what it was.
    pub fn finish(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_set_tool_resets_gesture() {
        let mut tm = ToolManager::new();
        tm.gesture = Gesture::Panning {
            last_screen: Point::ZERO,
        };
        tm.set_tool(ToolKind::Pen);
        assert_eq!(tm.current_tool, ToolKind::Pen);
        assert!(tm.gesture.is_idle());
    }

    #[test]
    fn test_shape_preview_is_normalized() {
        let g = Gesture::DrawingShape {
            anchor: Point::new(50.0, 50.0),
            current: Point::new(10.0, 20.0),
        };
        assert_eq!(g.shape_preview(), Some(Rect::new(10.0, 20.0, 50.0, 50.0)));
        assert!(g.pending_path().is_none());
    }

    #[test]
    fn test_finish_takes_gesture() {
        let mut tm = ToolManager::new();
        tm.gesture = Gesture::Drawing {
            path: Path::new(Point::ZERO, SerializableColor::black(), 2.0),
        };
        let g = tm.finish();
        assert!(g.pending_path().is_some());
        assert!(tm.gesture.is_idle());
    }

    #[test]
    fn test_all_tools_listed_once() {
        assert_eq!(ToolKind::ALL.len(), 5);
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }
}
