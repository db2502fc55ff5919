//! Scene model and the interactive canvas driving it.

use crate::camera::Camera;
use crate::config::WhiteboardConfig;
use crate::controls::UserPrompt;
use crate::document::SceneDocument;
use crate::hit_test::{find_resize_handle, find_topmost_at, hit_params};
use crate::images::{Bitmap, BitmapCache, ImageError, ImageRequest};
use crate::input::{CursorKind, Key, MouseButton, PointerEvent};
use crate::options_bar::{OptionsBar, PropertyEdit};
use crate::selection::{ResizeHandle, apply_resize};
use crate::session::Session;
use crate::shapes::{
    Element, ElementId, HitParams, Image, Path, Rectangle, SerializableColor, StickyNote, Text,
    fit_within,
};
use crate::tools::{Gesture, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};

/// Ordered element list. Sequence order is z-order, last on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of everything else.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Move an element to the top. Returns false if it is not in the scene.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.push(element);
                true
            }
            None => false,
        }
    }

    /// Move an element to the bottom. Returns false if it is not in the scene.
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.insert(0, element);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Z-order position, 0 being the bottom.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Elements back to front.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Union of all element bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Topmost element under a scene point.
    pub fn topmost_at(&self, point: Point, params: &HitParams) -> Option<ElementId> {
        find_topmost_at(self.elements.iter(), point, params)
    }
}

/// A whiteboard: scene, view transform, selection and the gesture in flight.
///
/// Every input goes through [`Canvas::handle_pointer_event`] and
/// [`Canvas::handle_key`]; mutations are synchronous and set a redraw flag the
/// host drains with [`Canvas::take_redraw`].
#[derive(Debug)]
pub struct Canvas {
    session: Session,
    pub config: WhiteboardConfig,
    scene: Scene,
    /// View transform.
    pub camera: Camera,
    tools: ToolManager,
    selected: Option<ElementId>,
    /// Overlay element whose editor has input focus.
    focused: Option<ElementId>,
    bitmaps: BitmapCache,
    /// Last pointer position in screen space, for hover feedback.
    pointer: Option<Point>,
    viewport_size: Size,
    /// Color for new pen strokes.
    pub pen_color: SerializableColor,
    /// Width for new pen strokes.
    pub stroke_width: f64,
    needs_redraw: bool,
}

impl Canvas {
    pub fn new(session: Session, config: WhiteboardConfig) -> Self {
        let config = config.sanitized();
        Self {
            session,
            camera: Camera::from_config(&config),
            pen_color: config.pen_color,
            stroke_width: config.stroke_width,
            config,
            scene: Scene::new(),
            tools: ToolManager::new(),
            selected: None,
            focused: None,
            bitmaps: BitmapCache::new(),
            pointer: None,
            viewport_size: Size::new(800.0, 600.0),
            needs_redraw: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn bitmaps(&self) -> &BitmapCache {
        &self.bitmaps
    }

    pub fn gesture(&self) -> &Gesture {
        &self.tools.gesture
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Switch tools. Any unfinished gesture is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tools.current_tool || !self.tools.gesture.is_idle() {
            self.tools.set_tool(tool);
            self.needs_redraw = true;
        }
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        if size != self.viewport_size {
            self.viewport_size = size;
            self.needs_redraw = true;
        }
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Hit tolerances at the current zoom.
    pub fn hit_params(&self) -> HitParams {
        hit_params(&self.config, self.camera.scale)
    }

    // --- selection -------------------------------------------------------

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.scene.get(id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Select a single element, replacing any previous selection.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.scene.contains(id) {
            log::debug!("Ignoring selection of unknown element {}", id);
            return false;
        }
        self.selected = Some(id);
        self.needs_redraw = true;
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Selected text or note content as `(html, plain)` for the clipboard.
    pub fn selected_text_for_clipboard(&self) -> Option<(String, String)> {
        match self.selected_element()? {
            Element::Text(text) if !text.is_blank() => Some((text.to_html(), text.content.clone())),
            Element::StickyNote(note) if !note.content.trim().is_empty() => {
                Some((note.to_html(), note.content.clone()))
            }
            _ => None,
        }
    }

    /// Screen-space bounds of the selected element.
    pub fn selected_screen_rect(&self) -> Option<Rect> {
        self.selected_element()
            .map(|element| self.camera.rect_to_screen(element.bounds()))
    }

    /// Where the options bar of size `panel` goes, if something is selected.
    pub fn options_bar_position(&self, panel: Size) -> Option<Point> {
        self.selected_screen_rect().map(|rect| {
            OptionsBar::position(rect, panel, self.viewport_size, self.config.options_bar_margin)
        })
    }

    // --- scene mutation --------------------------------------------------

    /// Add an element on top and select it.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        if let Element::Image(image) = &element {
            self.bitmaps.request(image.id(), &image.source_ref);
        }
        let id = self.scene.add_element(element);
        self.selected = Some(id);
        self.needs_redraw = true;
        id
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.scene.remove_element(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.tools.gesture.target() == Some(id) {
            self.tools.gesture = Gesture::Idle;
        }
        self.bitmaps.remove(id);
        self.needs_redraw = true;
        Some(removed)
    }

    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let moved = self.scene.bring_to_front(id);
        self.needs_redraw |= moved;
        moved
    }

    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let moved = self.scene.send_to_back(id);
        self.needs_redraw |= moved;
        moved
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        match self.selected {
            Some(id) => self.bring_to_front(id),
            None => false,
        }
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        match self.selected {
            Some(id) => self.send_to_back(id),
            None => false,
        }
    }

    /// Remove the selected element. Returns false when nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.remove_element(id).is_some(),
            None => false,
        }
    }

    /// Empty the board, including overlay elements and cached bitmaps.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.selected = None;
        self.focused = None;
        self.tools.gesture = Gesture::Idle;
        self.bitmaps.clear();
        self.needs_redraw = true;
    }

    /// Clear the board after the user confirms. Returns whether it was cleared.
    pub fn clear_board(&mut self, prompt: &dyn UserPrompt) -> bool {
        if !prompt.confirm("Clear the whole board? This cannot be undone.") {
            return false;
        }
        self.clear();
        log::info!("Cleared board {}", self.session.board_id);
        true
    }

    /// Write a property edit into the selected element.
    pub fn apply_property(&mut self, edit: PropertyEdit) -> bool {
        let Some(element) = self.selected.and_then(|id| self.scene.get_mut(id)) else {
            log::debug!("Property edit {:?} without a selection", edit.kind());
            return false;
        };
        let applied = OptionsBar::apply(element, edit);
        self.needs_redraw |= applied;
        applied
    }

    // --- images ----------------------------------------------------------

    /// Place an image centered in the viewport, scaled to fit the paste limit.
    pub fn insert_image(&mut self, source_ref: impl Into<String>, intrinsic: Size) -> ElementId {
        let size = fit_within(intrinsic, self.config.pasted_image_max);
        let center = self.camera.screen_to_world(Point::new(
            self.viewport_size.width / 2.0,
            self.viewport_size.height / 2.0,
        ));
        let origin = center - size.to_vec2() / 2.0;
        self.add_element(Element::Image(Image::new(origin, size, source_ref)))
    }

    /// Image loads the host still has to start.
    pub fn pending_image_loads(&mut self) -> Vec<ImageRequest> {
        self.bitmaps.drain_requests()
    }

    /// Deliver the result of an image load. Returns whether a redraw is needed.
    ///
    /// Results for elements that have left the scene are dropped.
    pub fn image_resolved(&mut self, id: ElementId, result: Result<Bitmap, ImageError>) -> bool {
        if !matches!(self.scene.get(id), Some(Element::Image(_))) {
            log::debug!("Discarding image result for removed element {}", id);
            self.bitmaps.remove(id);
            return false;
        }
        if let Err(err) = &result {
            log::warn!("Image {} failed to load: {}", id, err);
        }
        self.bitmaps.complete(id, result);
        self.needs_redraw = true;
        true
    }

    /// Queue another load for an image element.
    pub fn retry_image(&mut self, id: ElementId) -> bool {
        match self.scene.get(id) {
            Some(Element::Image(image)) => {
                self.bitmaps.request(id, &image.source_ref);
                true
            }
            _ => false,
        }
    }

    // --- overlay elements ------------------------------------------------

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Give an overlay element's editor input focus. It also becomes selected.
    pub fn focus_overlay(&mut self, id: ElementId) -> bool {
        if !self.scene.get(id).is_some_and(Element::is_overlay) {
            return false;
        }
        if self.focused != Some(id) {
            self.blur_overlay();
        }
        self.focused = Some(id);
        self.selected = Some(id);
        self.needs_redraw = true;
        true
    }

    /// Drop editor focus. A text element left blank is removed.
    pub fn blur_overlay(&mut self) -> bool {
        let Some(id) = self.focused.take() else {
            return false;
        };
        if matches!(self.scene.get(id), Some(Element::Text(text)) if text.is_blank()) {
            log::debug!("Removing empty text element {}", id);
            self.remove_element(id);
        }
        self.needs_redraw = true;
        true
    }

    /// Write edited content back into a text or note element.
    pub fn set_overlay_text(&mut self, id: ElementId, content: &str) -> bool {
        match self.scene.get_mut(id) {
            Some(Element::Text(text)) => {
                if text.content != content {
                    text.content = content.to_string();
                    text.invalidate_measurement();
                }
                true
            }
            Some(Element::StickyNote(note)) => {
                note.content = content.to_string();
                true
            }
            _ => false,
        }
    }

    /// Record the laid-out size (scene units) of a text element.
    pub fn set_measured_size(&mut self, id: ElementId, size: Size) {
        if let Some(text) = self.scene.get_mut(id).and_then(Element::as_text_mut) {
            text.set_measured_size(size);
        }
    }

    // --- persistence -----------------------------------------------------

    pub fn to_document(&self) -> SceneDocument {
        SceneDocument::from_elements(self.scene.iter())
    }

    /// Replace the board with a loaded document and reset the view.
    pub fn load_document(&mut self, document: SceneDocument) {
        self.clear();
        self.camera.reset();
        for element in document.into_elements() {
            if let Element::Image(image) = &element {
                self.bitmaps.request(image.id(), &image.source_ref);
            }
            self.scene.add_element(element);
        }
        log::info!(
            "Loaded {} element(s) into board {}",
            self.scene.len(),
            self.session.board_id
        );
    }

    // --- input -----------------------------------------------------------

    /// Single entry point for pointer input. Returns whether anything changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        let changed = match event {
            PointerEvent::Down {
                position, button, ..
            } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => {
                if modifiers.command() {
                    self.camera.zoom_wheel(position, delta.y);
                    true
                } else {
                    false
                }
            }
        };
        self.needs_redraw |= changed;
        changed
    }

    /// Keyboard input not consumed by an overlay editor.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Delete | Key::Backspace => {
                if self.focused.is_some() {
                    return false;
                }
                self.delete_selected()
            }
            Key::Escape => {
                let active = !self.tools.finish().is_idle();
                let blurred = self.blur_overlay();
                self.needs_redraw |= active;
                active || blurred
            }
        }
    }

    /// Cursor for the current gesture or hover target.
    pub fn cursor(&self) -> CursorKind {
        match &self.tools.gesture {
            Gesture::Panning { .. } => CursorKind::Grabbing,
            Gesture::Dragging { .. } | Gesture::DraggingPath { .. } => CursorKind::Move,
            Gesture::Resizing { handle, .. } => resize_cursor(*handle),
            Gesture::Drawing { .. } | Gesture::DrawingShape { .. } => CursorKind::Crosshair,
            Gesture::Idle => match self.tools.current_tool {
                ToolKind::Pen | ToolKind::Shape => CursorKind::Crosshair,
                ToolKind::Text | ToolKind::Note => CursorKind::Text,
                ToolKind::Select => self.hover_cursor(),
            },
        }
    }

    fn hover_cursor(&self) -> CursorKind {
        let Some(screen) = self.pointer else {
            return CursorKind::Default;
        };
        let world = self.camera.screen_to_world(screen);
        if let Some(handle) = self.handle_under(world) {
            return resize_cursor(handle);
        }
        match self.scene.topmost_at(world, &self.hit_params()) {
            Some(_) => CursorKind::Move,
            None => CursorKind::Default,
        }
    }

    /// Resize handle of the selected element under a scene point.
    fn handle_under(&self, world: Point) -> Option<ResizeHandle> {
        let element = self.selected_element()?;
        find_resize_handle(element, world, self.config.handle_radius / self.camera.scale)
    }

    fn pointer_down(&mut self, screen: Point, button: MouseButton) -> bool {
        self.pointer = Some(screen);
        if !self.tools.gesture.is_idle() {
            return false;
        }

        if matches!(button, MouseButton::Secondary | MouseButton::Middle) {
            self.blur_overlay();
            self.selected = None;
            self.tools.gesture = Gesture::Panning {
                last_screen: screen,
            };
            return true;
        }

        self.blur_overlay();
        let world = self.camera.screen_to_world(screen);
        match self.tools.current_tool {
            ToolKind::Select => self.begin_select(world),
            ToolKind::Pen => {
                self.selected = None;
                self.tools.gesture = Gesture::Drawing {
                    path: Path::new(world, self.pen_color, self.stroke_width),
                };
            }
            ToolKind::Shape => {
                self.selected = None;
                self.tools.gesture = Gesture::DrawingShape {
                    anchor: world,
                    current: world,
                };
            }
            ToolKind::Text => {
                let mut text = Text::new(world, "");
                text.font_family = self.config.font_family;
                text.font_size = self.config.font_size;
                text.color = self.config.text_color;
                let id = self.add_element(Element::Text(text));
                self.focus_overlay(id);
            }
            ToolKind::Note => {
                let mut note = StickyNote::new(world).with_size(self.config.note_size);
                note.background_color = self.config.note_color;
                note.font_size = self.config.note_font_size;
                let id = self.add_element(Element::StickyNote(note));
                self.focus_overlay(id);
            }
        }
        true
    }

    fn begin_select(&mut self, world: Point) {
        if let Some(handle) = self.handle_under(world) {
            let target = self
                .selected_element()
                .map(|el| (el.id(), el.bounds(), el.as_image().map(Image::aspect_ratio)));
            if let Some((id, start_rect, aspect)) = target {
                if let Some(Element::Rectangle(rect)) = self.scene.get_mut(id) {
                    rect.normalize();
                }
                self.tools.gesture = Gesture::Resizing {
                    id,
                    handle,
                    start_rect,
                    aspect,
                };
                return;
            }
        }

        let hit = self.scene.topmost_at(world, &self.hit_params());
        let Some(element) = hit.and_then(|id| self.scene.get(id)) else {
            self.selected = None;
            return;
        };
        let id = element.id();
        self.tools.gesture = match element {
            Element::Path(_) => Gesture::DraggingPath {
                id,
                last: world,
                moved: false,
            },
            other => Gesture::Dragging {
                id,
                offset: world - other.origin(),
                moved: false,
            },
        };
        self.selected = Some(id);
    }

    fn pointer_move(&mut self, screen: Point) -> bool {
        self.pointer = Some(screen);
        let world = self.camera.screen_to_world(screen);
        let min_resize = self.config.min_resize;

        match &mut self.tools.gesture {
            Gesture::Idle => return false,
            Gesture::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.camera.pan(delta);
            }
            Gesture::Dragging { id, offset, moved } => {
                *moved = true;
                if let Some(element) = self.scene.get_mut(*id) {
                    element.set_origin(world - *offset);
                }
            }
            Gesture::DraggingPath { id, last, moved } => {
                let delta = world - *last;
                *last = world;
                *moved = true;
                if let Some(element) = self.scene.get_mut(*id) {
                    element.translate(delta);
                }
            }
            Gesture::Resizing {
                id,
                handle,
                start_rect,
                aspect,
            } => {
                let rect = apply_resize(*start_rect, *handle, world, min_resize, *aspect);
                if let Some(element) = self.scene.get_mut(*id) {
                    set_element_rect(element, rect);
                }
            }
            Gesture::DrawingShape { current, .. } => *current = world,
            Gesture::Drawing { path } => path.add_point(world),
        }
        true
    }

    fn pointer_up(&mut self, screen: Point, button: MouseButton) -> bool {
        self.pointer = Some(screen);
        let panning = matches!(self.tools.gesture, Gesture::Panning { .. });
        if panning == (button == MouseButton::Primary) {
            return false;
        }

        let world = self.camera.screen_to_world(screen);
        match self.tools.finish() {
            Gesture::Idle => false,
            Gesture::Panning { .. } | Gesture::DraggingPath { .. } | Gesture::Resizing { .. } => {
                true
            }
            Gesture::Dragging { id, moved, .. } => {
                if !moved && self.scene.get(id).is_some_and(Element::is_overlay) {
                    self.focus_overlay(id);
                }
                true
            }
            Gesture::Drawing { mut path } => {
                if path.len() < 2 {
                    log::debug!("Discarding stroke with {} point(s)", path.len());
                    return true;
                }
                path.simplify(self.config.simplify_tolerance);
                self.add_element(Element::Path(path));
                self.tools.current_tool = ToolKind::Select;
                true
            }
            Gesture::DrawingShape { anchor, .. } => {
                let size: Vec2 = world - anchor;
                let min = self.config.min_shape_size;
                if size.x.abs() > min && size.y.abs() > min {
                    let mut rect = Rectangle::new(anchor, size.x, size.y)
                        .with_fill(self.config.rectangle_color, self.config.rectangle_opacity);
                    rect.normalize();
                    self.add_element(Element::Rectangle(rect));
                } else {
                    log::debug!("Discarding {:.1}x{:.1} rectangle", size.x, size.y);
                }
                true
            }
        }
    }
}

fn resize_cursor(handle: ResizeHandle) -> CursorKind {
    if handle.is_horizontal() {
        CursorKind::ResizeHorizontal
    } else {
        CursorKind::ResizeVertical
    }
}

/// Apply a resized rect to a rectangle or image.
fn set_element_rect(element: &mut Element, rect: Rect) {
    match element {
        Element::Rectangle(r) => {
            r.x = rect.x0;
            r.y = rect.y0;
            r.width = rect.width();
            r.height = rect.height();
        }
        Element::Image(img) => {
            img.x = rect.x0;
            img.y = rect.y0;
            img.width = rect.width();
            img.height = rect.height();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use std::cell::Cell;

    const EPS: f64 = 1e-9;

    fn canvas() -> Canvas {
        Canvas::new(Session::for_user("tester"), WhiteboardConfig::default())
    }

    fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    fn down(canvas: &mut Canvas, x: f64, y: f64) {
        canvas.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Primary,
            modifiers: Modifiers::NONE,
        });
    }

    fn move_to(canvas: &mut Canvas, x: f64, y: f64) {
        canvas.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn up(canvas: &mut Canvas, x: f64, y: f64) {
        canvas.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Primary,
        });
    }

    struct Answer(bool, Cell<u32>);

    impl UserPrompt for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.1.set(self.1.get() + 1);
            self.0
        }

        fn alert(&self, _message: &str) {}
    }

    #[test]
    fn test_scene_z_order() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = scene.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        let c = scene.add_element(rect_at(0.0, 0.0, 10.0, 10.0));

        assert!(scene.bring_to_front(a));
        assert_eq!(scene.iter().map(Element::id).collect::<Vec<_>>(), vec![b, c, a]);
        assert!(scene.send_to_back(c));
        assert_eq!(scene.iter().map(Element::id).collect::<Vec<_>>(), vec![c, b, a]);
        assert!(!scene.bring_to_front(uuid::Uuid::new_v4()));

        assert!(scene.remove_element(b).is_some());
        assert!(!scene.contains(b));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_scene_bounds() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        scene.add_element(rect_at(20.0, 5.0, 10.0, 10.0));
        assert_eq!(scene.bounds(), Some(Rect::new(0.0, 0.0, 30.0, 15.0)));
    }

    #[test]
    fn test_add_selects_and_replaces_selection() {
        let mut c = canvas();
        let a = c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.selected(), Some(a));
        let b = c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.selected(), Some(b));
        assert!(!c.is_selected(a));
    }

    #[test]
    fn test_rectangle_gesture_commits() {
        let mut c = canvas();
        c.set_tool(ToolKind::Shape);
        down(&mut c, 100.0, 100.0);
        move_to(&mut c, 60.0, 150.0);
        assert_eq!(
            c.gesture().shape_preview(),
            Some(Rect::new(60.0, 100.0, 100.0, 150.0))
        );
        assert!(c.scene().is_empty());
        up(&mut c, 60.0, 150.0);

        assert_eq!(c.scene().len(), 1);
        let Some(Element::Rectangle(r)) = c.selected_element() else {
            panic!("expected selected rectangle");
        };
        assert!((r.x - 60.0).abs() < EPS);
        assert!((r.width - 40.0).abs() < EPS);
        assert!((r.opacity - 0.5).abs() < EPS);
    }

    #[test]
    fn test_pen_gesture_switches_to_select() {
        let mut c = canvas();
        c.set_tool(ToolKind::Pen);
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 10.0, 0.0);
        move_to(&mut c, 20.0, 5.0);
        up(&mut c, 20.0, 5.0);

        assert_eq!(c.tool(), ToolKind::Select);
        assert!(matches!(c.selected_element(), Some(Element::Path(_))));
    }

    #[test]
    fn test_click_selects_then_drag_moves() {
        let mut c = canvas();
        let id = c.add_element(rect_at(10.0, 10.0, 100.0, 100.0));
        c.clear_selection();

        down(&mut c, 50.0, 50.0);
        assert_eq!(c.selected(), Some(id));
        move_to(&mut c, 70.0, 40.0);
        up(&mut c, 70.0, 40.0);

        let origin = c.scene().get(id).map(Element::origin);
        assert_eq!(origin, Some(Point::new(30.0, 0.0)));
        assert!(c.gesture().is_idle());
    }

    #[test]
    fn test_path_drag_moves_points() {
        let mut c = canvas();
        let path = Path::from_points(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            SerializableColor::black(),
            2.0,
        );
        let id = c.add_element(Element::Path(path));
        down(&mut c, 50.0, 5.0);
        assert!(matches!(c.gesture(), Gesture::DraggingPath { .. }));
        move_to(&mut c, 55.0, 15.0);
        up(&mut c, 55.0, 15.0);

        let Some(Element::Path(p)) = c.scene().get(id) else { panic!() };
        assert_eq!(p.points, vec![Point::new(5.0, 10.0), Point::new(105.0, 10.0)]);
    }

    #[test]
    fn test_resize_handle_on_selected_rectangle() {
        let mut c = canvas();
        let id = c.add_element(rect_at(0.0, 0.0, 100.0, 50.0));
        down(&mut c, 100.0, 25.0);
        assert!(matches!(
            c.gesture(),
            Gesture::Resizing {
                handle: ResizeHandle::Right,
                ..
            }
        ));
        assert_eq!(c.cursor(), CursorKind::ResizeHorizontal);
        move_to(&mut c, 3.0, 25.0);
        up(&mut c, 3.0, 25.0);

        let bounds = c.scene().get(id).map(Element::bounds);
        assert_eq!(bounds, Some(Rect::new(0.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_image_resize_keeps_aspect() {
        let mut c = canvas();
        let id = c.add_element(Element::Image(Image::new(
            Point::ZERO,
            Size::new(200.0, 100.0),
            "blob:a",
        )));
        down(&mut c, 200.0, 50.0);
        move_to(&mut c, 100.0, 50.0);
        up(&mut c, 100.0, 50.0);

        let bounds = c.scene().get(id).map(Element::bounds).unwrap();
        assert!((bounds.width() - 100.0).abs() < EPS);
        assert!((bounds.height() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_secondary_button_pans_and_deselects() {
        let mut c = canvas();
        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        c.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Secondary,
            modifiers: Modifiers::NONE,
        });
        assert!(c.selected().is_none());
        assert_eq!(c.cursor(), CursorKind::Grabbing);
        move_to(&mut c, 130.0, 90.0);
        c.handle_pointer_event(PointerEvent::Up {
            position: Point::new(130.0, 90.0),
            button: MouseButton::Secondary,
        });
        assert_eq!(c.camera.offset, Vec2::new(30.0, -10.0));
        assert!(c.gesture().is_idle());
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let mut c = canvas();
        let plain = PointerEvent::Wheel {
            position: Point::ZERO,
            delta: Vec2::new(0.0, -1.0),
            modifiers: Modifiers::NONE,
        };
        assert!(!c.handle_pointer_event(plain));
        assert!((c.camera.scale - 1.0).abs() < EPS);

        let zoom = PointerEvent::Wheel {
            position: Point::ZERO,
            delta: Vec2::new(0.0, -1.0),
            modifiers: Modifiers::CTRL,
        };
        assert!(c.handle_pointer_event(zoom));
        assert!((c.camera.scale - 1.1).abs() < EPS);
    }

    #[test]
    fn test_text_tool_creates_focused_text() {
        let mut c = canvas();
        c.set_tool(ToolKind::Text);
        down(&mut c, 40.0, 40.0);
        up(&mut c, 40.0, 40.0);

        let id = c.focused().unwrap();
        assert_eq!(c.selected(), Some(id));
        assert!(matches!(c.scene().get(id), Some(Element::Text(_))));
        assert_eq!(c.cursor(), CursorKind::Text);
    }

    #[test]
    fn test_blank_text_removed_on_blur() {
        let mut c = canvas();
        c.set_tool(ToolKind::Text);
        down(&mut c, 40.0, 40.0);
        up(&mut c, 40.0, 40.0);
        let id = c.focused().unwrap();
        c.set_overlay_text(id, "   ");
        assert!(c.blur_overlay());
        assert!(!c.scene().contains(id));
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_note_kept_when_empty() {
        let mut c = canvas();
        c.set_tool(ToolKind::Note);
        down(&mut c, 0.0, 0.0);
        up(&mut c, 0.0, 0.0);
        let id = c.focused().unwrap();
        c.blur_overlay();
        let Some(Element::StickyNote(note)) = c.scene().get(id) else { panic!() };
        assert!((note.width - 200.0).abs() < EPS);
    }

    #[test]
    fn test_click_on_text_focuses_it() {
        let mut c = canvas();
        let id = c.add_element(Element::Text(Text::new(Point::new(10.0, 10.0), "hello")));
        c.clear_selection();
        down(&mut c, 15.0, 15.0);
        up(&mut c, 15.0, 15.0);
        assert_eq!(c.focused(), Some(id));
    }

    #[test]
    fn test_selected_text_copies_as_html() {
        let mut c = canvas();
        c.add_element(Element::Text(Text::new(Point::ZERO, "a < b\nc")));
        let (html, plain) = c.selected_text_for_clipboard().unwrap();
        assert_eq!(html, "a &lt; b<br>c");
        assert_eq!(plain, "a < b\nc");

        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        assert!(c.selected_text_for_clipboard().is_none());

        let mut note = StickyNote::new(Point::ZERO);
        note.content = "x & y".into();
        c.add_element(Element::StickyNote(note));
        let (html, _) = c.selected_text_for_clipboard().unwrap();
        assert_eq!(html, "x &amp; y");
    }

    #[test]
    fn test_delete_key_respects_focus() {
        let mut c = canvas();
        let id = c.add_element(Element::Text(Text::new(Point::ZERO, "keep")));
        c.focus_overlay(id);
        assert!(!c.handle_key(Key::Delete));
        assert!(c.scene().contains(id));

        c.blur_overlay();
        assert!(c.handle_key(Key::Backspace));
        assert!(c.scene().is_empty());
    }

    #[test]
    fn test_escape_discards_stroke() {
        let mut c = canvas();
        c.set_tool(ToolKind::Pen);
        down(&mut c, 0.0, 0.0);
        move_to(&mut c, 50.0, 50.0);
        assert!(c.handle_key(Key::Escape));
        up(&mut c, 50.0, 50.0);
        assert!(c.scene().is_empty());
    }

    #[test]
    fn test_apply_property_and_z_order_buttons() {
        let mut c = canvas();
        let a = c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        c.select(a);
        assert!(c.apply_property(PropertyEdit::Opacity(0.25)));
        assert!(c.bring_selected_to_front());
        assert_eq!(c.scene().iter().last().map(Element::id), Some(a));
        assert!(c.send_selected_to_back());
        assert_eq!(c.scene().index_of(a), Some(0));

        c.clear_selection();
        assert!(!c.apply_property(PropertyEdit::Opacity(0.5)));
        assert!(!c.delete_selected());
    }

    #[test]
    fn test_clear_board_requires_confirmation() {
        let mut c = canvas();
        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));

        let no = Answer(false, Cell::new(0));
        assert!(!c.clear_board(&no));
        assert_eq!(no.1.get(), 1);
        assert_eq!(c.scene().len(), 1);

        let yes = Answer(true, Cell::new(0));
        assert!(c.clear_board(&yes));
        assert!(c.scene().is_empty());
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_insert_image_centered_and_queued() {
        let mut c = canvas();
        c.set_viewport_size(Size::new(1000.0, 800.0));
        let id = c.insert_image("blob:abc", Size::new(800.0, 400.0));

        let bounds = c.scene().get(id).map(Element::bounds).unwrap();
        assert_eq!(bounds, Rect::new(300.0, 300.0, 700.0, 500.0));
        let requests = c.pending_image_loads();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].source_ref, "blob:abc");
        assert!(c.pending_image_loads().is_empty());
    }

    #[test]
    fn test_image_resolved_guards_removed_elements() {
        let mut c = canvas();
        let id = c.insert_image("blob:abc", Size::new(10.0, 10.0));
        c.remove_element(id);
        let bitmap = Bitmap::new(1, 1, vec![0u8; 4]);
        assert!(!c.image_resolved(id, Ok(bitmap)));
        assert!(c.bitmaps().get(id).is_none());
    }

    #[test]
    fn test_retry_image_requeues() {
        let mut c = canvas();
        let id = c.insert_image("blob:abc", Size::new(10.0, 10.0));
        c.pending_image_loads();
        assert!(c.image_resolved(id, Err(ImageError::Decode("bad".into()))));
        assert!(c.retry_image(id));
        assert_eq!(c.pending_image_loads().len(), 1);
    }

    #[test]
    fn test_load_document_resets_view() {
        let mut c = canvas();
        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        c.camera.zoom_at(Point::new(10.0, 10.0), 2.0);
        c.camera.pan(Vec2::new(5.0, 5.0));
        let doc = c.to_document();

        c.load_document(doc);
        assert_eq!(c.scene().len(), 1);
        assert!((c.camera.scale - 1.0).abs() < EPS);
        assert_eq!(c.camera.offset, Vec2::ZERO);
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_take_redraw() {
        let mut c = canvas();
        assert!(c.take_redraw());
        assert!(!c.take_redraw());
        c.add_element(rect_at(0.0, 0.0, 10.0, 10.0));
        assert!(c.take_redraw());
    }
}
