//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::{Context, Result};
use serde_json::Value;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single record
    pub fn print_record(&self, value: &Value) -> Result<()> {
        match self.format {
            OutputFormat::Human | OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
            OutputFormat::Quiet => {
                println!("{}", serde_json::to_string(value)?);
            }
        }
        Ok(())
    }

    /// Print the raw records of a collection
    pub fn print_records(&self, collection: &str, records: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No records in '{}'.", collection);
                    return Ok(());
                }
                for raw in records {
                    print!("{}", raw);
                    if !raw.ends_with('\n') {
                        println!();
                    }
                }
                println!("\n{} record(s)", records.len());
            }
            OutputFormat::Json => {
                let values = parse_records(records)?;
                println!("{}", serde_json::to_string_pretty(&values)?);
            }
            OutputFormat::Quiet => {
                for value in parse_records(records)? {
                    println!("{}", serde_json::to_string(&value)?);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn parse_records(records: &[String]) -> Result<Vec<Value>> {
    records
        .iter()
        .map(|raw| serde_json::from_str(raw).context("Stored record is not valid JSON"))
        .collect()
}
