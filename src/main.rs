mod app;
mod color;
mod state;
mod ui;

use app::SirViewerApp;
use eframe::egui;
use sir_viewer::ViewerConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SIR GUI",
        options,
        Box::new(|_cc| Ok(Box::new(SirViewerApp::new(AppState::from_config(config))))),
    )
}
