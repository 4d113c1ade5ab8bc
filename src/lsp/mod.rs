//! Editor diagnostics.
//!
//! Converts validation results into the diagnostics an editor client
//! expects, and keeps one location resolver per open document so several
//! documents can be linted side by side. Message framing and the transport
//! are left to the embedding server.
//!
//! # Example
//!
//! ```
//! use berth::ast::{Instruction, SourceRange, Stage, WorkdirCommand};
//! use berth::lint::RuleRegistry;
//! use berth::lsp::LintSession;
//!
//! let mut session = LintSession::new(RuleRegistry::builtin());
//! session.open("file:///Dockerfile", "FROM alpine:3.20\nWORKDIR app");
//!
//! let stage = Stage::new("alpine:3.20").with_command(Instruction::Workdir(WorkdirCommand {
//!     path: "app".to_string(),
//!     original: "WORKDIR app".to_string(),
//!     location: vec![SourceRange::line(2)],
//! }));
//! let params = session.lint("file:///Dockerfile", &[stage]).unwrap();
//!
//! assert_eq!(params.diagnostics.len(), 1);
//! assert_eq!(params.diagnostics[0].range.start.line, 1);
//! ```

pub mod diagnostic;
pub mod session;

pub use diagnostic::{
    to_diagnostic, to_diagnostics, Diagnostic, Position, PublishDiagnosticsParams, Range,
    DIAGNOSTIC_SOURCE,
};
pub use session::LintSession;
