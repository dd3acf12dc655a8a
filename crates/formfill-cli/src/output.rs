//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use formfill_extractor::{FormSnapshot, Notifier};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a session snapshot (both forms plus the hint).
    pub fn format_snapshot(&self, snapshot: &FormSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
            OutputFormat::Table => self.format_snapshot_table(snapshot),
        }
    }

    fn format_snapshot_table(&self, snapshot: &FormSnapshot) -> Result<String> {
        let record = &snapshot.record;

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["name.first", &record.name.first]);
        builder.push_record(["name.last", &record.name.last]);
        builder.push_record(["address.address01", &record.address.address01]);
        builder.push_record([
            "address.address02",
            record.address.address02.as_deref().unwrap_or(""),
        ]);
        builder.push_record(["address.city", &record.address.city]);
        builder.push_record(["address.state", &record.address.state]);
        builder.push_record(["address.zipcode", &record.address.zipcode]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = String::new();
        if !snapshot.source_text.is_empty() {
            output.push_str(&format!("Message: {}\n", snapshot.source_text));
        }
        output.push_str(&table.to_string());
        if let Some(hint) = &snapshot.hint {
            output.push('\n');
            output.push_str(&self.colorize(hint, "cyan"));
        }
        if snapshot.loading {
            output.push('\n');
            output.push_str(&self.progress());
        }

        Ok(output)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a blocking notice.
    pub fn alert(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the in-flight indicator shown while a cycle awaits the model.
    pub fn progress(&self) -> String {
        self.colorize("(waiting for the model...)", "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Blocking user-facing notices, printed to stderr.
///
/// The terminal stand-in for the original's alert dialog.
#[derive(Debug, Clone)]
pub struct AlertNotifier {
    formatter: Formatter,
}

impl AlertNotifier {
    /// Create a notifier using the given formatter.
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }
}

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", self.formatter.alert(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::TargetRecord;

    fn snapshot() -> FormSnapshot {
        let mut record = TargetRecord::default();
        record.name.first = "Jane".to_string();
        record.address.zipcode = "62704".to_string();
        FormSnapshot {
            source_text: "I'm Jane".to_string(),
            record,
            hint: Some("ℹ️ Please provide a zip code.".to_string()),
            loading: false,
            revision: 3,
        }
    }

    #[test]
    fn test_table_format_lists_all_fields() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_snapshot(&snapshot()).unwrap();

        assert!(output.contains("name.first"));
        assert!(output.contains("Jane"));
        assert!(output.contains("address.zipcode"));
        assert!(output.contains("62704"));
        assert!(output.contains("Please provide a zip code."));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_snapshot(&snapshot()).unwrap();

        assert!(output.contains("\"first\": \"Jane\""));
        assert!(output.contains("\"revision\": 3"));
    }

    #[test]
    fn test_progress_indicator() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.progress(), "(waiting for the model...)");
    }

    #[test]
    fn test_loading_snapshot_carries_progress_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut in_flight = snapshot();
        in_flight.loading = true;

        let output = formatter.format_snapshot(&in_flight).unwrap();
        assert!(output.contains("(waiting for the model...)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.alert("test"), "⚠ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
