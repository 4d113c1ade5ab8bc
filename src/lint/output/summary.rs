//! Human-readable summary formatter.
//!
//! Violations are grouped by severity (Error, Warning, Info, Deprecation,
//! Unknown) and sorted by start line within each group:
//!
//! ```text
//! Berth summary: 1 Error, 2 Warnings
//!
//! Error:
//! Line  3 | CPY001 | Flags must be prefixed with exactly two dashes.
//!
//! Warnings:
//! Line  1 | STS001 | Image "ubuntu" should have an explicit tag.
//! Line 12 | RUN004 | Do not use sudo as it leads to unpredictable behavior.
//! ```

use std::io::Write;

use serde::Deserialize;

use super::LintFormatter;
use crate::lint::{Severity, ValidationResult};
use crate::ui::BerthTheme;

/// How much detail the summary shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// One header line with counts per severity.
    Short,
    /// Header plus one line per violation.
    #[default]
    Normal,
    /// Normal plus each rule's description and documentation link.
    High,
}

/// Formats lint output for human consumption.
#[derive(Debug, Clone)]
pub struct SummaryFormatter {
    theme: BerthTheme,
    verbosity: Verbosity,
}

impl SummaryFormatter {
    /// Create a new summary formatter.
    pub fn new(use_color: bool, verbosity: Verbosity) -> Self {
        Self {
            theme: BerthTheme::for_color(use_color),
            verbosity,
        }
    }

    /// `n Name` with a plural `s` when there is more than one.
    fn group_name(severity: Severity, count: usize) -> String {
        if count > 1 {
            format!("{}s", severity)
        } else {
            severity.to_string()
        }
    }

    fn write_header<W: Write>(
        &self,
        groups: &[(Severity, Vec<&ValidationResult>)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        write!(writer, "Berth summary: ")?;
        if groups.is_empty() {
            return writeln!(writer, "{}", self.theme.success.apply_to("Everything looks good."));
        }

        let counts: Vec<String> = groups
            .iter()
            .map(|(severity, items)| {
                let text = format!("{} {}", items.len(), Self::group_name(*severity, items.len()));
                self.theme.severity(*severity).apply_to(text).to_string()
            })
            .collect();
        writeln!(writer, "{}", counts.join(", "))
    }

    fn write_body<W: Write>(
        &self,
        groups: &[(Severity, Vec<&ValidationResult>)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let line_width = groups
            .iter()
            .flat_map(|(_, items)| items)
            .map(|result| result.location().start.line.to_string().len())
            .max()
            .unwrap_or(1);

        for (severity, items) in groups {
            let style = self.theme.severity(*severity);
            writeln!(writer)?;
            writeln!(writer, "{}:", style.apply_to(Self::group_name(*severity, items.len())))?;

            for result in items {
                writeln!(
                    writer,
                    "Line {:>width$} | {} | {}",
                    result.location().start.line,
                    style.apply_to(result.rule_id()),
                    result.message(),
                    width = line_width
                )?;
                if self.verbosity == Verbosity::High {
                    let indent = " ".repeat(line_width + 5);
                    writeln!(writer, "{}{}", indent, self.theme.dim.apply_to(result.rule().description))?;
                    writeln!(writer, "{}See {}", indent, result.rule().docs_reference())?;
                }
            }
        }
        Ok(())
    }
}

/// Violated results grouped by severity in report order, empty groups
/// dropped. The sort is stable so equal lines keep traversal order.
fn group_by_severity(results: &[ValidationResult]) -> Vec<(Severity, Vec<&ValidationResult>)> {
    Severity::ALL
        .into_iter()
        .filter_map(|severity| {
            let mut items: Vec<&ValidationResult> = results
                .iter()
                .filter(|result| result.is_violated() && result.severity() == severity)
                .collect();
            items.sort_by_key(|result| result.location().start.line);
            (!items.is_empty()).then_some((severity, items))
        })
        .collect()
}

impl LintFormatter for SummaryFormatter {
    fn format<W: Write>(&self, results: &[ValidationResult], writer: &mut W) -> std::io::Result<()> {
        let groups = group_by_severity(results);
        self.write_header(&groups, writer)?;
        if self.verbosity != Verbosity::Short && !groups.is_empty() {
            self.write_body(&groups, writer)?;
        }
        Ok(())
    }
}
