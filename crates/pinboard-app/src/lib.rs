//! Pinboard Application
//!
//! Desktop shell around the whiteboard engine: windowing, input translation,
//! painting, overlay editors and background storage work.

mod app;
mod clipboard;
mod config;
mod input;
mod surface;
mod tasks;
mod ui;

pub use app::PinboardApp;
pub use config::AppConfig;
pub use tasks::{TaskResult, Tasks};
pub use ui::{UiAction, UiState};
