//! Main application entry point.

use pinboard_app::{AppConfig, PinboardApp};

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = AppConfig::load();
    log::info!(
        "Starting Pinboard for user {} on board {}",
        config.user_id,
        config.board_id
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([config.width, config.height]),
        ..Default::default()
    };
    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(PinboardApp::new(cc, config)))),
    )
}
