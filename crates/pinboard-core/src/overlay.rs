//! Screen-space projection of text and sticky notes.
//!
//! Overlay elements are plain scene data. Their editors are positioned from
//! this projection every frame instead of being kept in sync by hand.

use crate::canvas::Canvas;
use crate::shapes::{Element, ElementId, FontFamily, SerializableColor};
use kurbo::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Text,
    Note,
}

/// Presentation of one overlay element, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayNode {
    pub id: ElementId,
    pub kind: OverlayKind,
    pub rect: Rect,
    pub content: String,
    pub font_family: FontFamily,
    /// Font size after applying the view scale.
    pub font_size: f64,
    pub color: SerializableColor,
    pub background: Option<SerializableColor>,
    pub focused: bool,
    pub selected: bool,
}

/// Overlay nodes for every text and note element, back to front.
pub fn overlay_nodes(canvas: &Canvas) -> Vec<OverlayNode> {
    let camera = &canvas.camera;
    canvas
        .scene()
        .iter()
        .filter_map(|element| {
            let (kind, content, font_family, font_size, color, background) = match element {
                Element::Text(t) => (
                    OverlayKind::Text,
                    &t.content,
                    t.font_family,
                    t.font_size,
                    t.color,
                    None,
                ),
                Element::StickyNote(n) => (
                    OverlayKind::Note,
                    &n.content,
                    FontFamily::Sans,
                    n.font_size,
                    SerializableColor::black(),
                    Some(n.background_color),
                ),
                _ => return None,
            };
            let id = element.id();
            Some(OverlayNode {
                id,
                kind,
                rect: camera.rect_to_screen(element.bounds()),
                content: content.clone(),
                font_family,
                font_size: font_size * camera.scale,
                color,
                background,
                focused: canvas.focused() == Some(id),
                selected: canvas.is_selected(id),
            })
        })
        .collect()
}
