mod app;
mod state;
mod ui;

use app::AtlasApp;
use democracy_atlas::config::AtlasConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AtlasConfig::from_env();
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Democracy Atlas",
        options,
        Box::new(|_cc| Ok(Box::new(AtlasApp::new(config)))),
    )
}
