//! End-to-end gestures driven through the pointer dispatcher.

use kurbo::{Point, Rect, Vec2};
use pinboard_core::shapes::{Path, Rectangle, SerializableColor};
use pinboard_core::{
    Canvas, Element, Gesture, Modifiers, MouseButton, PointerEvent, Session, ToolKind,
    WhiteboardConfig,
};

fn canvas() -> Canvas {
    Canvas::new(Session::for_user("tester"), WhiteboardConfig::default())
}

fn drag(canvas: &mut Canvas, from: Point, to: Point) {
    canvas.handle_pointer_event(PointerEvent::Down {
        position: from,
        button: MouseButton::Primary,
        modifiers: Modifiers::NONE,
    });
    canvas.handle_pointer_event(PointerEvent::Move { position: to });
    canvas.handle_pointer_event(PointerEvent::Up {
        position: to,
        button: MouseButton::Primary,
    });
}

fn wheel(canvas: &mut Canvas, at: Point, delta_y: f64) {
    canvas.handle_pointer_event(PointerEvent::Wheel {
        position: at,
        delta: Vec2::new(0.0, delta_y),
        modifiers: Modifiers::CTRL,
    });
}

#[test]
fn micro_rectangle_is_not_committed() {
    let mut c = canvas();
    c.set_tool(ToolKind::Shape);
    drag(&mut c, Point::new(50.0, 50.0), Point::new(52.0, 51.0));
    assert!(c.scene().is_empty());
    assert!(c.gesture().is_idle());
}

#[test]
fn clicking_empty_space_clears_selection() {
    let mut c = canvas();
    c.add_element(Element::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0)));
    assert!(c.selected().is_some());

    drag(&mut c, Point::new(400.0, 400.0), Point::new(400.0, 400.0));
    assert!(c.selected().is_none());
    assert!(c.options_bar_position(kurbo::Size::new(100.0, 30.0)).is_none());
}

#[test]
fn drag_at_double_zoom_moves_half_distance() {
    let mut c = canvas();
    let id = c.add_element(Element::Rectangle(Rectangle::new(Point::new(100.0, 100.0), 50.0, 50.0)));
    c.camera.zoom_at(Point::ZERO, 2.0);
    assert!((c.camera.scale - 2.0).abs() < 1e-9);

    // Scene (110, 110) is at screen (220, 220).
    drag(&mut c, Point::new(220.0, 220.0), Point::new(260.0, 200.0));

    let Some(Element::Rectangle(r)) = c.scene().get(id) else {
        panic!("rectangle missing");
    };
    assert!((r.x - 120.0).abs() < 1e-9);
    assert!((r.y - 90.0).abs() < 1e-9);
}

#[test]
fn single_point_stroke_is_discarded() {
    let mut c = canvas();
    c.set_tool(ToolKind::Pen);
    c.handle_pointer_event(PointerEvent::Down {
        position: Point::new(10.0, 10.0),
        button: MouseButton::Primary,
        modifiers: Modifiers::NONE,
    });
    c.handle_pointer_event(PointerEvent::Up {
        position: Point::new(10.0, 10.0),
        button: MouseButton::Primary,
    });
    assert!(c.scene().is_empty());
    assert_eq!(c.tool(), ToolKind::Pen);
}

#[test]
fn stroke_is_previewed_before_commit() {
    let mut c = canvas();
    c.set_tool(ToolKind::Pen);
    c.handle_pointer_event(PointerEvent::Down {
        position: Point::new(0.0, 0.0),
        button: MouseButton::Primary,
        modifiers: Modifiers::NONE,
    });
    c.handle_pointer_event(PointerEvent::Move {
        position: Point::new(30.0, 30.0),
    });
    assert_eq!(c.gesture().pending_path().map(Path::len), Some(2));
    assert!(c.scene().is_empty());
}

#[test]
fn zoom_keeps_cursor_point_fixed() {
    let mut c = canvas();
    c.camera.pan(Vec2::new(40.0, -15.0));
    let cursor = Point::new(300.0, 200.0);
    let scene_point = c.camera.screen_to_world(cursor);

    wheel(&mut c, cursor, -1.0);
    let after = c.camera.world_to_screen(scene_point);
    assert!((after - cursor).hypot() < 1e-9);

    wheel(&mut c, cursor, 1.0);
    assert!((c.camera.scale - 0.99).abs() < 1e-9);
}

#[test]
fn zoom_is_clamped() {
    let mut c = canvas();
    for _ in 0..200 {
        wheel(&mut c, Point::new(10.0, 10.0), -500.0);
    }
    assert!((c.camera.scale - 5.0).abs() < 1e-9);
    for _ in 0..200 {
        wheel(&mut c, Point::new(10.0, 10.0), 500.0);
    }
    assert!((c.camera.scale - 0.1).abs() < 1e-9);
}

#[test]
fn inverted_zoom_limits_from_raw_json_do_not_panic() {
    let config: WhiteboardConfig = serde_json::from_str(r#"{"minZoom": 6}"#).unwrap();
    let mut c = Canvas::new(Session::for_user("tester"), config);
    assert!(c.config.min_zoom <= c.config.max_zoom);
    for delta in [-1.0, 1.0, 1.0] {
        wheel(&mut c, Point::new(10.0, 10.0), delta);
        assert!(c.camera.scale >= c.camera.min_zoom);
        assert!(c.camera.scale <= c.camera.max_zoom);
    }
}

#[test]
fn path_hit_radius_boundary() {
    let mut c = canvas();
    let path = Path::from_points(
        vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)],
        SerializableColor::black(),
        15.0,
    );
    let id = c.add_element(Element::Path(path));
    let params = c.hit_params();

    // Radius is max(20, 15 + 10) = 25.
    assert_eq!(c.scene().topmost_at(Point::new(100.0, 25.0), &params), Some(id));
    assert_eq!(c.scene().topmost_at(Point::new(100.0, 25.5), &params), None);
}

#[test]
fn panning_blocks_other_gestures() {
    let mut c = canvas();
    c.set_tool(ToolKind::Shape);
    c.handle_pointer_event(PointerEvent::Down {
        position: Point::new(0.0, 0.0),
        button: MouseButton::Secondary,
        modifiers: Modifiers::NONE,
    });
    c.handle_pointer_event(PointerEvent::Down {
        position: Point::new(0.0, 0.0),
        button: MouseButton::Primary,
        modifiers: Modifiers::NONE,
    });
    assert!(matches!(c.gesture(), Gesture::Panning { .. }));
}

#[test]
fn options_bar_sits_above_selection() {
    let mut c = canvas();
    c.set_viewport_size(kurbo::Size::new(800.0, 600.0));
    c.add_element(Element::Rectangle(Rectangle::new(Point::new(300.0, 300.0), 100.0, 50.0)));
    let pos = c.options_bar_position(kurbo::Size::new(120.0, 30.0)).unwrap();
    assert!((pos.x - 290.0).abs() < 1e-9);
    assert!((pos.y - 260.0).abs() < 1e-9);
    assert_eq!(c.selected_screen_rect(), Some(Rect::new(300.0, 300.0, 400.0, 350.0)));
}
