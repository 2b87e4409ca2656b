mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::FssPlotApp;
use config::Config;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let columns = config.columns()?;

    let dataset = data::loader::load_file(&config.input, columns)
        .with_context(|| format!("loading {}", config.input.display()))?;
    let errors = dataset.finite_size_errors();
    if errors.is_empty() {
        log::warn!("{} has no finite-size rows", config.input.display());
    }

    let styles = color::series_styles();
    export::write_pdf(&errors, &styles, &config.output)?;

    println!("{errors}");

    if config.no_show {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config.input, config.output, columns, dataset);
    eframe::run_native(
        "fss-plot – finite-size errors",
        options,
        Box::new(|_cc| Ok(Box::new(FssPlotApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
