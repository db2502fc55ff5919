//! Translation from egui input to canvas events.

use egui::{CursorIcon, Event, MouseWheelUnit, PointerButton, Pos2};
use kurbo::{Point, Vec2};
use pinboard_core::{CursorKind, Key, Modifiers, MouseButton, PointerEvent};

/// Pixels per wheel line, for line-based scroll deltas.
const LINE_HEIGHT: f32 = 40.0;

pub fn mouse_button(button: PointerButton) -> Option<MouseButton> {
    match button {
        PointerButton::Primary => Some(MouseButton::Primary),
        PointerButton::Secondary => Some(MouseButton::Secondary),
        PointerButton::Middle => Some(MouseButton::Middle),
        PointerButton::Extra1 | PointerButton::Extra2 => None,
    }
}

pub fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl,
        alt: m.alt,
        meta: m.mac_cmd,
    }
}

pub fn cursor_icon(kind: CursorKind) -> CursorIcon {
    match kind {
        CursorKind::Default => CursorIcon::Default,
        CursorKind::Crosshair => CursorIcon::Crosshair,
        CursorKind::Text => CursorIcon::Text,
        CursorKind::Move => CursorIcon::Move,
        CursorKind::ResizeHorizontal => CursorIcon::ResizeHorizontal,
        CursorKind::ResizeVertical => CursorIcon::ResizeVertical,
        CursorKind::Grabbing => CursorIcon::Grabbing,
    }
}

fn key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Delete => Some(Key::Delete),
        egui::Key::Backspace => Some(Key::Backspace),
        egui::Key::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Key presses forwarded to the canvas.
pub fn canvas_key(event: &Event) -> Option<Key> {
    match event {
        Event::Key {
            key: pressed_key,
            pressed: true,
            ..
        } => key(*pressed_key),
        _ => None,
    }
}

/// Maps raw egui events into canvas-relative pointer events.
pub struct PointerTranslator {
    /// Top-left of the canvas in egui screen coordinates.
    pub origin: Pos2,
    /// Whether the pointer is over the bare canvas (not a panel or editor).
    pub hovered: bool,
    /// Latest pointer position, used for wheel events.
    pub pointer: Option<Pos2>,
}

impl PointerTranslator {
    fn local(&self, pos: Pos2) -> Point {
        Point::new((pos.x - self.origin.x) as f64, (pos.y - self.origin.y) as f64)
    }

    /// Presses and wheel steps only count over the canvas; moves and releases
    /// always do, so gestures end cleanly outside it.
    pub fn translate(&self, event: &Event) -> Option<PointerEvent> {
        match event {
            Event::PointerMoved(pos) => Some(PointerEvent::Move {
                position: self.local(*pos),
            }),
            Event::PointerButton {
                pos,
                button,
                pressed,
                modifiers: mods,
            } => {
                let button = mouse_button(*button)?;
                if *pressed {
                    self.hovered.then(|| PointerEvent::Down {
                        position: self.local(*pos),
                        button,
                        modifiers: modifiers(*mods),
                    })
                } else {
                    Some(PointerEvent::Up {
                        position: self.local(*pos),
                        button,
                    })
                }
            }
            Event::MouseWheel {
                unit,
                delta,
                modifiers: mods,
                ..
            } => self.wheel(*unit, *delta, *mods),
            _ => None,
        }
    }

    fn wheel(
        &self,
        unit: MouseWheelUnit,
        delta: egui::Vec2,
        mods: egui::Modifiers,
    ) -> Option<PointerEvent> {
        if !self.hovered || delta.y == 0.0 {
            return None;
        }
        let pos = self.pointer?;
        let scale = match unit {
            MouseWheelUnit::Point => 1.0,
            MouseWheelUnit::Line => LINE_HEIGHT,
            MouseWheelUnit::Page => LINE_HEIGHT * 10.0,
        };
        // egui reports scrolling up as positive y; the canvas expects
        // positive y for scrolling down.
        Some(PointerEvent::Wheel {
            position: self.local(pos),
            delta: Vec2::new((delta.x * scale) as f64, (-delta.y * scale) as f64),
            modifiers: modifiers(mods),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(hovered: bool) -> PointerTranslator {
        PointerTranslator {
            origin: Pos2::new(0.0, 40.0),
            hovered,
            pointer: Some(Pos2::new(100.0, 140.0)),
        }
    }

    fn press(pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(10.0, 50.0),
            button: PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_positions_are_canvas_relative() {
        let event = translator(true).translate(&press(true));
        assert_eq!(
            event,
            Some(PointerEvent::Down {
                position: Point::new(10.0, 10.0),
                button: MouseButton::Primary,
                modifiers: Modifiers::NONE,
            })
        );
    }

    #[test]
    fn test_press_outside_canvas_ignored_but_release_kept() {
        let t = translator(false);
        assert_eq!(t.translate(&press(true)), None);
        assert!(matches!(t.translate(&press(false)), Some(PointerEvent::Up { .. })));
    }

    #[test]
    fn test_wheel_direction_flipped() {
        let event = translator(true).wheel(
            MouseWheelUnit::Line,
            egui::vec2(0.0, 1.0),
            egui::Modifiers::CTRL,
        );
        let Some(PointerEvent::Wheel {
            position,
            delta,
            modifiers,
        }) = event
        else {
            panic!("expected wheel event");
        };
        assert_eq!(position, Point::new(100.0, 100.0));
        assert!(delta.y < 0.0);
        assert!(modifiers.command());
    }

    #[test]
    fn test_extra_buttons_ignored() {
        assert_eq!(mouse_button(PointerButton::Extra1), None);
    }

    #[test]
    fn test_horizontal_wheel_ignored() {
        let event = translator(true).wheel(
            MouseWheelUnit::Point,
            egui::vec2(3.0, 0.0),
            egui::Modifiers::CTRL,
        );
        assert_eq!(event, None);
    }

    #[test]
    fn test_canvas_keys() {
        assert_eq!(key(egui::Key::Escape), Some(Key::Escape));
        assert_eq!(key(egui::Key::Delete), Some(Key::Delete));
        assert_eq!(key(egui::Key::A), None);
    }
}
