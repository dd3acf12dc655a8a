//! Formfill CLI library.
//!
//! This library provides the terminal front end for formfill: argument
//! parsing, configuration management, the interactive REPL, and output
//! formatting for the two forms.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::{AlertNotifier, Formatter};
