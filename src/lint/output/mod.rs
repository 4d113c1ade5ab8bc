//! Lint report formatters.
//!
//! This module renders validation results in the formats the CLI offers
//! (a human summary and JSON).

pub mod json;
pub mod summary;

use std::fmt;
use std::io::Write;

use serde::Deserialize;

use crate::lint::ValidationResult;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Grouped, human-readable summary.
    #[default]
    Summary,
    /// Violations as a JSON array.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format results to the given writer.
    ///
    /// Results that are not violated are skipped by every formatter.
    fn format<W: Write>(&self, results: &[ValidationResult], writer: &mut W) -> std::io::Result<()>;
}

pub use json::JsonFormatter;
pub use summary::{SummaryFormatter, Verbosity};
