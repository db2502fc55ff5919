//! Pinboard Core Library
//!
//! Platform-agnostic scene model, hit-testing, interaction state machine and
//! persistence for the Pinboard whiteboard.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod controls;
pub mod document;
pub mod geometry;
pub mod images;
pub mod input;
pub mod options_bar;
pub mod overlay;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, Scene};
pub use config::WhiteboardConfig;
pub use controls::{SaveIndicator, SaveState, UserPrompt};
pub use document::{NoteRecord, SceneDocument};
pub use images::{Bitmap, BitmapCache, ImageError, ImageRequest};
pub use input::{CursorKind, Key, Modifiers, MouseButton, PointerEvent};
pub use options_bar::{OptionsBar, PropertyEdit, PropertyKind};
pub use overlay::{OverlayKind, OverlayNode, overlay_nodes};
pub use selection::ResizeHandle;
pub use session::Session;
pub use shapes::{Element, ElementId};
pub use tools::{Gesture, ToolKind};
