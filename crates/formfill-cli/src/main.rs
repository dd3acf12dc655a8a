//! Formfill CLI - fill out a structured form from free text with an LLM.

use clap::Parser;
use formfill_cli::repl;
use formfill_cli::{Cli, CliError, Config, Formatter};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> formfill_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Extraction settings: defaults, then config file, then flags
    let mut extractor_config = config.extractor_config();
    if let Some(model) = cli.model {
        extractor_config.model = model;
    }
    if let Some(quiet_window_ms) = cli.quiet_window_ms {
        extractor_config.quiet_window_ms = quiet_window_ms;
    }
    extractor_config.validate().map_err(CliError::Config)?;

    repl::run_repl(extractor_config, &formatter).await
}
