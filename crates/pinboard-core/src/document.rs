//! Persisted board document.

use crate::shapes::{Element, ElementId, SerializableColor, StickyNote};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plain, JSON-compatible snapshot of a board.
///
/// Sticky notes live only in `notes`; `elements` holds everything else in
/// z-order. Each note remembers its slot in the combined order so a reload
/// restores the same stacking. Bitmaps and measured text sizes are never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub elements: Vec<Element>,
    pub notes: Vec<NoteRecord>,
}

/// Persisted form of a sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: ElementId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_note_size")]
    pub width: f64,
    #[serde(default = "default_note_size")]
    pub height: f64,
    #[serde(default = "default_note_color")]
    pub background_color: SerializableColor,
    #[serde(default = "default_note_font_size")]
    pub font_size: f64,
    /// Position of the note in the combined scene order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

fn default_note_size() -> f64 {
    StickyNote::DEFAULT_SIZE
}

fn default_note_color() -> SerializableColor {
    StickyNote::new(kurbo::Point::ZERO).background_color
}

fn default_note_font_size() -> f64 {
    StickyNote::new(kurbo::Point::ZERO).font_size
}

impl From<&StickyNote> for NoteRecord {
    fn from(note: &StickyNote) -> Self {
        Self {
            id: note.id(),
            text: note.content.clone(),
            x: note.x,
            y: note.y,
            width: note.width,
            height: note.height,
            background_color: note.background_color,
            font_size: note.font_size,
            index: None,
        }
    }
}

impl From<NoteRecord> for StickyNote {
    fn from(record: NoteRecord) -> Self {
        let mut note = StickyNote::new(kurbo::Point::new(record.x, record.y));
        note.id = record.id;
        note.width = record.width;
        note.height = record.height;
        note.content = record.text;
        note.background_color = record.background_color;
        note.font_size = record.font_size;
        note
    }
}

impl SceneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split scene elements (in z-order) into the persisted layout.
    pub fn from_elements<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Self {
        let mut doc = Self::new();
        for (index, element) in elements.into_iter().enumerate() {
            match element {
                Element::StickyNote(note) => {
                    let mut record = NoteRecord::from(note);
                    record.index = Some(index);
                    doc.notes.push(record);
                }
                other => doc.elements.push(other.clone()),
            }
        }
        doc
    }

    /// Rebuild scene elements in z-order.
    ///
    /// Notes with a stored index are re-inserted at that slot. Notes without
    /// one, and notes that older documents embedded in `elements`, go on top
    /// unless `notes` already carries the same id.
    pub fn into_elements(self) -> Vec<Element> {
        let mut canvas = Vec::with_capacity(self.elements.len() + self.notes.len());
        let mut embedded = Vec::new();
        for element in self.elements {
            match element {
                Element::StickyNote(note) => embedded.push(note),
                other => canvas.push(other),
            }
        }

        for note in embedded {
            if self.notes.iter().all(|n| n.id != note.id()) {
                canvas.push(Element::StickyNote(note));
            }
        }

        let (mut placed, floating): (Vec<_>, Vec<_>) =
            self.notes.into_iter().partition(|record| record.index.is_some());
        placed.sort_by_key(|record| record.index);
        for record in placed {
            let slot = record.index.unwrap_or(usize::MAX).min(canvas.len());
            canvas.insert(slot, Element::StickyNote(record.into()));
        }
        canvas.extend(
            floating
                .into_iter()
                .map(|record| Element::StickyNote(record.into())),
        );
        canvas
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.notes.is_empty()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Path, Rectangle, Text};
    use kurbo::Point;

    #[test]
    fn test_notes_split_out() {
        let rect = Element::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0));
        let mut note = StickyNote::new(Point::new(5.0, 6.0));
        note.content = "hello".into();
        let note = Element::StickyNote(note);
        let doc = SceneDocument::from_elements([&rect, &note]);
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.notes.len(), 1);
        assert_eq!(doc.notes[0].text, "hello");
        assert_eq!(doc.notes[0].id, note.id());
    }

    #[test]
    fn test_json_field_names() {
        let path = Element::Path(Path::from_points(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            SerializableColor::black(),
            3.0,
        ));
        let note = Element::StickyNote(StickyNote::new(Point::ZERO));
        let doc = SceneDocument::from_elements([&path, &note]);
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(json["elements"][0]["type"], "path");
        assert_eq!(json["elements"][0]["strokeWidth"], 3.0);
        assert_eq!(json["elements"][0]["points"][1]["x"], 1.0);
        assert_eq!(json["notes"][0]["text"], "");
        assert_eq!(json["notes"][0]["width"], 200.0);
    }

    #[test]
    fn test_minimal_note_record_loads() {
        let doc = SceneDocument::from_json(
            r#"{"notes":[{"text":"hi","x":1,"y":2,"width":200,"height":200}]}"#,
        )
        .unwrap();
        let elements = doc.into_elements();
        assert_eq!(elements.len(), 1);
        let Element::StickyNote(note) = &elements[0] else { panic!("expected note") };
        assert_eq!(note.content, "hi");
        assert!((note.font_size - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_embedded_duplicate_note_dropped() {
        let note = StickyNote::new(Point::ZERO);
        let doc = SceneDocument {
            elements: vec![
                Element::Text(Text::new(Point::ZERO, "t")),
                Element::StickyNote(note.clone()),
            ],
            notes: vec![NoteRecord::from(&note)],
        };
        let elements = doc.into_elements();
        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[0], Element::Text(_)));
    }

    #[test]
    fn test_note_below_rectangle_keeps_order() {
        let note = Element::StickyNote(StickyNote::new(Point::ZERO));
        let rect = Element::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 50.0, 50.0));
        let text = Element::Text(Text::new(Point::new(300.0, 0.0), "t"));
        let before = vec![note.clone(), rect.clone(), text.clone()];
        let doc = SceneDocument::from_elements(&before);
        assert_eq!(doc.notes[0].index, Some(0));

        let json = doc.to_json().unwrap();
        let after = SceneDocument::from_json(&json).unwrap().into_elements();
        let ids: Vec<_> = after.iter().map(Element::id).collect();
        assert_eq!(ids, vec![note.id(), rect.id(), text.id()]);
    }

    #[test]
    fn test_out_of_range_note_index_clamped() {
        let mut record = NoteRecord::from(&StickyNote::new(Point::ZERO));
        record.index = Some(42);
        let doc = SceneDocument {
            elements: vec![Element::Text(Text::new(Point::ZERO, "t"))],
            notes: vec![record],
        };
        let elements = doc.into_elements();
        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[1], Element::StickyNote(_)));
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(SceneDocument::from_json("{\"elements\": 3}").is_err());
        assert!(SceneDocument::from_json("{}").unwrap().is_empty());
    }
}
