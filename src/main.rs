mod app;
mod color;
mod config;
mod data;
mod state;
mod summary;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::StarfallApp;
use clap::Parser;
use config::Config;
use eframe::egui;

#[derive(Parser, Debug)]
#[command(name = "starfall")]
#[command(about = "Explore meteorite strikes by year, class and mass", long_about = None)]
struct Args {
    /// Data file to open at startup (.json, .csv or .parquet)
    file: Option<PathBuf>,

    /// Config file (defaults to ./starfall.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()
            .context("loading default config")?
            .unwrap_or_default(),
    };
    log::debug!("Using config: {config:?}");

    let startup_file = config.startup_file(args.file);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Starfall – Meteorite Strikes",
        options,
        Box::new(move |_cc| Ok(Box::new(StarfallApp::new(&config, startup_file)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
