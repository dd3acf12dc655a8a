//! CLI argument parsing.

use clap::Parser;

/// Formfill - fill out a structured form from free text with an LLM.
#[derive(Debug, Parser)]
#[command(name = "formfill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Model identifier override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Quiet window in milliseconds before a text change triggers extraction
    #[arg(long)]
    pub quiet_window_ms: Option<u64>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
