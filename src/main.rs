mod analysis;
mod app;
mod color;
mod config;
mod data;
mod error;
mod params;
mod session;
mod state;
mod terminal;
mod ui;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use app::BiosensingApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::AppState;

/// Flag biosensor events and export outlier-filtered, baseline-corrected windows.
#[derive(Parser, Debug)]
#[command(name = "biosensing-stats", version, about)]
struct Args {
    /// Recording to open at startup
    file: Option<PathBuf>,

    /// Run the review in the terminal instead of the window
    #[arg(long)]
    terminal: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for exported CSV files (overrides the configuration)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    log::debug!("Using {config:?}");

    if args.terminal {
        let mut session = session::Session::new(config);
        let stdin = std::io::stdin();
        let mut prompt = terminal::TerminalPrompt::new(stdin.lock(), std::io::stdout());
        let summary = terminal::run(&mut session, args.file, &mut prompt)?;
        log::info!(
            "Reviewed {} events, exported {} files",
            summary.reviewed,
            summary.exported.len()
        );
        return Ok(());
    }

    let mut state = AppState::new(config);
    if let Some(path) = &args.file {
        state.load_file(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([710.0, 460.0]),
        ..Default::default()
    };

    eframe::run_native(
        "biosensing-stats",
        options,
        Box::new(|_cc| Ok(Box::new(BiosensingApp::new(state)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
