//! Core application state and frame loop.

use std::sync::Arc;
use std::time::Instant;

use egui::{Event, Sense};
use kurbo::Size;
use pinboard_core::images::ImageSource;
use pinboard_core::storage::{MemoryBlobStore, MemoryStorage};
use pinboard_core::{Canvas, SaveIndicator, ToolKind, UserPrompt};
use pinboard_render::{RenderContext, redraw};

use crate::clipboard;
use crate::config::AppConfig;
use crate::input::{PointerTranslator, canvas_key, cursor_icon};
use crate::surface::{EguiSurface, TextureCache};
use crate::tasks::{TaskResult, Tasks};
use crate::ui::{self, DialogPrompt, UiAction, UiState};

/// The Pinboard desktop application.
pub struct PinboardApp {
    canvas: Canvas,
    tasks: Tasks,
    save: SaveIndicator,
    textures: TextureCache,
    ui_state: UiState,
    prompt: DialogPrompt,
}

impl PinboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut tasks = Tasks::with_file_stores(config.data_dir.clone()).unwrap_or_else(|e| {
            log::error!("Board storage unavailable, changes will not persist: {}", e);
            Tasks::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryBlobStore::new()))
        });
        tasks.set_repaint(cc.egui_ctx.clone());

        let canvas = Canvas::new(config.session(), config.whiteboard.clone());
        tasks.load(canvas.session());

        Self {
            canvas,
            tasks,
            save: SaveIndicator::default(),
            textures: TextureCache::default(),
            ui_state: UiState::default(),
            prompt: DialogPrompt,
        }
    }

    fn poll_tasks(&mut self) {
        for result in self.tasks.drain() {
            match result {
                TaskResult::Loaded(Ok(Some(document))) => self.canvas.load_document(document),
                TaskResult::Loaded(Ok(None)) => {
                    log::info!("Board {} is new", self.canvas.session().board_id);
                }
                TaskResult::Loaded(Err(e)) => {
                    log::error!("Failed to load board: {}", e);
                    self.prompt.alert(&format!("Could not load the board: {e}"));
                }
                TaskResult::Saved(result) => {
                    if let Err(e) = &result {
                        log::error!("Failed to save board: {}", e);
                    }
                    self.save.finish(result.is_ok(), Instant::now());
                }
                TaskResult::Uploaded(Ok((asset, size))) => {
                    let id = self.canvas.insert_image(ImageSource::blob_ref(&asset), size);
                    log::info!("Inserted image {} as element {}", asset, id);
                }
                TaskResult::Uploaded(Err(e)) => {
                    log::error!("Image upload failed: {}", e);
                    self.prompt.alert(&format!("Could not add the image: {e}"));
                }
                TaskResult::ImageLoaded { id, result } => {
                    self.canvas.image_resolved(id, result);
                }
            }
        }
    }

    fn start_image_loads(&mut self) {
        for request in self.canvas.pending_image_loads() {
            self.tasks.fetch_image(request.element_id, request.source_ref);
        }
    }

    fn paste_image(&mut self) {
        match clipboard::paste_image() {
            Ok(Some(png)) => self.tasks.upload_image(png),
            Ok(None) => log::debug!("Clipboard holds no image"),
            Err(e) => {
                log::error!("{}", e);
                self.prompt.alert(&e.to_string());
            }
        }
    }

    fn copy_selection(&mut self) {
        let Some((html, plain)) = self.canvas.selected_text_for_clipboard() else {
            return;
        };
        if let Err(e) = clipboard::copy_html(html, plain) {
            log::error!("{}", e);
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::SetTool(tool) => self.canvas.set_tool(tool),
            UiAction::SetPenColor(color) => self.canvas.pen_color = color,
            UiAction::SetStrokeWidth(width) => self.canvas.stroke_width = width,
            UiAction::Property(edit) => {
                self.canvas.apply_property(edit);
            }
            UiAction::BringToFront => {
                self.canvas.bring_selected_to_front();
            }
            UiAction::SendToBack => {
                self.canvas.send_selected_to_back();
            }
            UiAction::DeleteSelected => {
                self.canvas.delete_selected();
            }
            UiAction::RetryImage(id) => {
                self.canvas.retry_image(id);
            }
            UiAction::InsertImage => {
                let picked = rfd::FileDialog::new()
                    .set_title("Insert image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                    .pick_file();
                if let Some(path) = picked {
                    self.tasks.upload_file(path);
                }
            }
            UiAction::PasteImage => self.paste_image(),
            UiAction::CopySelection => self.copy_selection(),
            UiAction::ClearBoard => {
                self.canvas.clear_board(&self.prompt);
            }
            UiAction::Save => {
                if self.save.begin() {
                    self.tasks
                        .save(self.canvas.session(), self.canvas.to_document());
                }
            }
        }
    }

    /// Keyboard input the overlay editors did not take.
    fn handle_keys(&mut self, ctx: &egui::Context, events: &[Event]) -> Vec<UiAction> {
        let typing = ctx.wants_keyboard_input();
        let mut actions = Vec::new();
        for event in events {
            if let Some(key) = canvas_key(event) {
                if !typing || key == pinboard_core::Key::Escape {
                    self.canvas.handle_key(key);
                }
            }
            if !typing {
                match event {
                    Event::Paste(_) => actions.push(UiAction::PasteImage),
                    Event::Copy => actions.push(UiAction::CopySelection),
                    _ => {}
                }
            }
        }
        if !typing {
            for tool in ToolKind::ALL {
                let (key, _) = ui::tool_hotkey(tool);
                if ctx.input(|i| i.key_pressed(key) && i.modifiers.is_none()) {
                    actions.push(UiAction::SetTool(tool));
                }
            }
            if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S)) {
                actions.push(UiAction::Save);
            }
        }
        actions
    }

    fn canvas_panel(&mut self, ui: &mut egui::Ui, events: &[Event]) -> Vec<UiAction> {
        let ctx = ui.ctx().clone();
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.canvas
            .set_viewport_size(Size::new(rect.width() as f64, rect.height() as f64));

        let translator = PointerTranslator {
            origin: rect.min,
            hovered: response.hovered(),
            pointer: ctx.input(|i| i.pointer.latest_pos()),
        };
        for event in events {
            if let Some(pointer_event) = translator.translate(event) {
                self.canvas.handle_pointer_event(pointer_event);
            }
        }
        if response.hovered() || !self.canvas.gesture().is_idle() {
            ctx.set_cursor_icon(cursor_icon(self.canvas.cursor()));
        }

        let painter = ui.painter_at(rect);
        let mut surface = EguiSurface::new(&painter, &mut self.textures);
        redraw(&RenderContext::new(&self.canvas), &mut surface);
        let scene = self.canvas.scene();
        self.textures.retain(|id| scene.contains(id));

        ui::overlays(&ctx, &painter, &mut self.canvas, rect.min, &mut self.ui_state);
        ui::options_bar(&ctx, &self.canvas, rect.min, &mut self.ui_state)
    }
}

impl eframe::App for PinboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();

        let now = Instant::now();
        self.save.tick(now);
        if let Some(remaining) = self.save.remaining(now) {
            ctx.request_repaint_after(remaining);
        }

        let events = ctx.input(|i| i.events.clone());
        let mut actions = self.handle_keys(ctx, &events);

        egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                actions.extend(ui::toolbar(ui, &self.canvas, &self.save));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                actions.extend(self.canvas_panel(ui, &events));
            });

        for action in actions {
            self.handle_action(action);
        }
        self.start_image_loads();
        if self.canvas.take_redraw() {
            ctx.request_repaint();
        }
    }
}
