#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// A small text and code editor with an output pane.
#[derive(Parser, Debug)]
#[command(name = "codepad", version, about)]
struct Cli {
    /// File to open on startup.
    file: Option<PathBuf>,

    /// Keep theme, font and tab size in the session store across runs.
    #[arg(long)]
    persist: bool,

    /// Config file to use instead of codepad.json next to the executable.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting codepad {}", env!("CARGO_PKG_VERSION"));

    let startup_args = codepad_ui::StartupArgs {
        file: cli.file,
        persist: cli.persist,
        config_path: cli.config,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text-Code Editor")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "codepad",
        native_options,
        Box::new(move |cc| Ok(Box::new(codepad_ui::App::new(cc, startup_args)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
