//! Protocol diagnostic types and conversion.

use serde::Serialize;

use crate::lint::ValidationResult;
use crate::location::{Location, LocationRange};

/// Source label attached to every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "berth";

const PUBLISH_METHOD: &str = "textDocument/publishDiagnostics";

/// Zero-based line and character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl From<Location> for Position {
    /// Lines are 1-based internally and 0-based on the wire.
    fn from(location: Location) -> Self {
        Self {
            line: location.line.saturating_sub(1),
            character: location.character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl From<LocationRange> for Range {
    fn from(range: LocationRange) -> Self {
        Self {
            start: range.start.into(),
            end: range.end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    /// 1 error, 2 warning, 3 information, 4 hint.
    pub severity: u8,
    pub source: &'static str,
    /// The rule ID.
    pub code: String,
    pub message: String,
}

/// Parameters of a `textDocument/publishDiagnostics` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishDiagnosticsParams {
    pub uri: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl PublishDiagnosticsParams {
    /// Build from a lint run, keeping violations only.
    pub fn new(uri: impl Into<String>, results: &[ValidationResult]) -> Self {
        Self {
            uri: uri.into(),
            diagnostics: to_diagnostics(results),
        }
    }

    /// The complete JSON-RPC notification.
    pub fn to_notification(&self) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "method": PUBLISH_METHOD,
            "params": self,
        })
    }
}

pub fn to_diagnostic(result: &ValidationResult) -> Diagnostic {
    Diagnostic {
        range: result.location().into(),
        severity: result.severity().lsp_code(),
        source: DIAGNOSTIC_SOURCE,
        code: result.rule_id().to_string(),
        message: result.message().to_string(),
    }
}

/// One diagnostic per violated result, in result order.
pub fn to_diagnostics(results: &[ValidationResult]) -> Vec<Diagnostic> {
    results
        .iter()
        .filter(|result| result.is_violated())
        .map(to_diagnostic)
        .collect()
}
