use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use entry_core::{LogSink, Settings};
use tracing::info;

mod controller;
mod ui;

use ui::EntryGuiApp;

#[derive(Parser, Debug)]
#[command(name = "entry_gui", about = "Greenhouse plant observation form")]
struct Args {
    /// Settings file (defaults to ./entry.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let catalog = settings.catalog().context("failed to load reference tables")?;
    info!(
        crops = catalog.crops().len(),
        fields = settings.entry_fields.len(),
        "reference tables loaded"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gewächshaus Datenerfassung")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Gewächshaus Datenerfassung",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(EntryGuiApp::new(
                catalog,
                settings.entry_fields,
                LogSink,
            )))
        }),
    )
    .map_err(|err| anyhow!("ui event loop failed: {err}"))
}
