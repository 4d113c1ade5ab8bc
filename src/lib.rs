//! Berth - Static analysis for container build files.
//!
//! Berth lints the instruction tree an external tokenizer produces from a
//! build file. Rules are bound to one kind of tree node each; the linter walks
//! the tree, dispatches every node to the rules for its kind, and narrows the
//! coarse locations of the tree to exact ranges using the raw file text.
//!
//! # Modules
//!
//! - [`ast`] - Instruction tree consumed by the linter
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.berth.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Rule registry, built-in rules, linter and report formats
//! - [`location`] - Raw-text location resolution
//! - [`lsp`] - Editor diagnostics built from lint results
//! - [`shell`] - Shell command parsing for RUN, CMD and ENTRYPOINT
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use berth::ast::Stage;
//! use berth::lint::{Linter, RuleRegistry};
//! use berth::location::LocationResolver;
//!
//! let stages: Vec<Stage> = serde_json::from_str(
//!     r#"[{"base_name": "node:latest", "location": [
//!         {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 0}}
//!     ]}]"#,
//! )
//! .unwrap();
//! let resolver = LocationResolver::from_text("FROM node:latest");
//!
//! let results = Linter::new(RuleRegistry::builtin()).run(&stages, &resolver);
//! let latest = results.iter().find(|r| r.rule_id() == "STS002").unwrap();
//!
//! assert!(latest.is_violated());
//! assert_eq!(latest.location().start.character, 5);
//! ```

pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod location;
pub mod lsp;
pub mod shell;
pub mod ui;

pub use error::{BerthError, Result};
