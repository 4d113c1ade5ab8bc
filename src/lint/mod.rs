//! Rule registry and linter.
//!
//! The lint system consists of:
//!
//! - **Rules** - Static checks bound to one node kind ([`Rule`], [`Validator`])
//! - **Registry** - Rules indexed by node kind ([`RuleRegistry`])
//! - **Linter** - Walks a stage list and dispatches each node ([`Linter`])
//! - **Results** - One [`ValidationResult`] per rule and node
//!
//! # Example
//!
//! ```
//! use berth::ast::{Instruction, Stage, WorkdirCommand};
//! use berth::lint::{Linter, RuleRegistry};
//! use berth::location::LocationResolver;
//!
//! let stage = Stage::new("alpine:3.20").with_command(Instruction::Workdir(WorkdirCommand {
//!     path: "app".to_string(),
//!     ..Default::default()
//! }));
//!
//! let results = Linter::new(RuleRegistry::builtin()).run(&[stage], &LocationResolver::new());
//! let violated: Vec<_> = results.iter().filter(|r| r.is_violated()).collect();
//!
//! assert_eq!(violated.len(), 1);
//! assert_eq!(violated[0].rule_id(), "WKD001");
//! ```

pub mod context;
pub mod docs;
pub mod linter;
pub mod output;
pub mod registry;
pub mod result;
pub mod rule;
pub mod rules;

pub use context::{BuildArgs, RuleContext};
pub use docs::docs_reference;
pub use linter::Linter;
pub use output::{JsonFormatter, LintFormatter, OutputFormat, SummaryFormatter, Verbosity};
pub use registry::RuleRegistry;
pub use result::{RuleOutcome, ValidationResult};
pub use rule::{Rule, RuleId, Severity, Validator};
