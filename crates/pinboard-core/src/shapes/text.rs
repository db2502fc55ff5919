//! Text shape.

use super::{ElementId, HitParams, SerializableColor};
use crate::geometry::rect_contains_with_buffer;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Sans",
            FontFamily::Serif => "Serif",
            FontFamily::Mono => "Mono",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::Sans, FontFamily::Serif, FontFamily::Mono]
    }
}

/// A free-standing text label edited through the overlay surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub(crate) id: ElementId,
    /// Top-left corner of the text box.
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_family: FontFamily,
    pub font_size: f64,
    pub color: SerializableColor,
    /// Layout size reported by the presentation layer, in scene units.
    /// If None, approximate bounds are used.
    #[serde(skip)]
    measured: Option<Size>,
}

impl Text {
    /// Average glyph advance relative to the font size.
    const CHAR_WIDTH_RATIO: f64 = 0.6;
    /// Line height relative to the font size.
    const LINE_HEIGHT_RATIO: f64 = 1.2;
    /// An empty label is still this many glyphs wide so it can be clicked.
    const MIN_CHARS: f64 = 4.0;

    pub fn new(origin: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            content: content.into(),
            font_family: FontFamily::default(),
            font_size: 16.0,
            color: SerializableColor::black(),
            measured: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Record the laid-out size of the presentation node.
    ///
    /// Blank labels keep the estimate so they stay clickable.
    pub fn set_measured_size(&mut self, size: Size) {
        self.measured = if self.is_blank() { None } else { Some(size) };
    }

    /// Forget the measured size (content or font changed).
    pub fn invalidate_measurement(&mut self) {
        self.measured = None;
    }

    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Size used for hit-testing and decoration.
    pub fn size(&self) -> Size {
        self.measured
            .filter(|_| !self.is_blank())
            .unwrap_or_else(|| self.estimated_size())
    }

    fn estimated_size(&self) -> Size {
        let lines = self.content.lines().count().max(1) as f64;
        let longest = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as f64;
        Size::new(
            longest.max(Self::MIN_CHARS) * self.font_size * Self::CHAR_WIDTH_RATIO,
            lines * self.font_size * Self::LINE_HEIGHT_RATIO,
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    pub fn hit_test(&self, point: Point, params: &HitParams) -> bool {
        rect_contains_with_buffer(self.bounds(), point, params.buffer)
    }

    /// Whether the label has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Content escaped for presentation through HTML, newlines as `<br>`.
    pub fn to_html(&self) -> String {
        html_lines(&self.content)
    }
}

pub(crate) fn html_lines(content: &str) -> String {
    escape_html(content).replace('\n', "<br>")
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_bounds_grow_with_content() {
        let short = Text::new(Point::ZERO, "hi");
        let long = Text::new(Point::ZERO, "a much longer line of text");
        assert!(long.bounds().width() > short.bounds().width());

        let two_lines = Text::new(Point::ZERO, "one\ntwo");
        assert!((two_lines.bounds().height() - 2.0 * 16.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_measured_size_wins() {
        let mut text = Text::new(Point::new(10.0, 10.0), "hello");
        text.set_measured_size(Size::new(120.0, 30.0));
        assert_eq!(text.bounds(), Rect::new(10.0, 10.0, 130.0, 40.0));
        text.invalidate_measurement();
        assert!(text.measured_size().is_none());
    }

    #[test]
    fn test_empty_text_is_clickable() {
        let text = Text::new(Point::ZERO, "");
        assert!(text.is_blank());
        assert!(text.hit_test(Point::new(5.0, 5.0), &HitParams::default()));
    }

    #[test]
    fn test_blank_text_ignores_zero_measurement() {
        let mut text = Text::new(Point::ZERO, "");
        let estimate = text.size();
        text.set_measured_size(Size::new(0.0, 19.0));
        assert!(text.measured_size().is_none());
        assert!((text.size().width - estimate.width).abs() < 1e-9);
        assert!(text.hit_test(Point::new(20.0, 5.0), &HitParams::default()));
    }

    #[test]
    fn test_measurement_dropped_when_content_cleared() {
        let mut text = Text::new(Point::ZERO, "wide label");
        text.set_measured_size(Size::new(90.0, 19.0));
        text.content = "   ".into();
        assert!(text.size().width > 0.0);
        assert!((text.size().width - text.estimated_size().width).abs() < 1e-9);
    }

    #[test]
    fn test_to_html_escapes() {
        let text = Text::new(Point::ZERO, "<b>&\"x\"</b>\nnext");
        assert_eq!(
            text.to_html(),
            "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;<br>next"
        );
    }
}
