//! JSON output formatter.
//!
//! Formats violations as machine-readable JSON for tooling integration.

use std::io::Write;

use serde::Serialize;

use super::LintFormatter;
use crate::lint::{RuleId, Severity, ValidationResult};
use crate::location::LocationRange;

/// Formats lint output as a JSON array of violations.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct JsonViolation<'a> {
    #[serde(rename = "RuleID")]
    rule_id: RuleId,
    severity: Severity,
    is_violated: bool,
    message: &'a str,
    location_range: LocationRange,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, results: &[ValidationResult], writer: &mut W) -> std::io::Result<()> {
        let violations: Vec<_> = results
            .iter()
            .filter(|result| result.is_violated())
            .map(|result| JsonViolation {
                rule_id: result.rule_id(),
                severity: result.severity(),
                is_violated: true,
                message: result.message(),
                location_range: result.location(),
            })
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &violations).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
