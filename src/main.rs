mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::DeathRateApp;
use clap::Parser;
use config::{ChartConfig, Theme};
use eframe::egui;
use state::{AppState, build_plan};

#[derive(Parser)]
#[command(name = "death-rate-viewer")]
#[command(about = "Area chart of death rates from air pollution, world-wide or per country")]
struct Args {
    /// Death-rate CSV to open on startup
    data: Option<PathBuf>,

    /// JSON chart configuration (default: $DEATH_RATE_CONFIG, else built-in)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start on this country instead of the world view
    #[arg(long)]
    country: Option<String>,

    /// Render the view to an SVG file and exit
    #[arg(long, requires = "data")]
    svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = ChartConfig::load(args.config.as_deref())?;
    let theme = config.theme()?;

    if let Some(svg) = &args.svg {
        return export_svg(&args, svg, &config, &theme);
    }

    let mut state = AppState::new(config, theme);
    if let Some(path) = &args.data {
        state.load_path(path);
    }
    if args.country.is_some() {
        state.select_country(args.country.clone());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 760.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Death Rate from Air Pollution",
        options,
        Box::new(|_cc| Ok(Box::new(DeathRateApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Headless path: load, plan, write SVG.
fn export_svg(args: &Args, svg: &std::path::Path, config: &ChartConfig, theme: &Theme) -> Result<()> {
    let data = args.data.as_deref().context("--svg needs a data file")?;
    let dataset = data::loader::load_file(data, config.row_policy)?;
    log::info!("Loaded {} records from {}", dataset.len(), data.display());

    let plan = build_plan(&dataset, config, theme, args.country.as_deref())?;
    export::write_svg(svg, &plan, &config.layout)
}
