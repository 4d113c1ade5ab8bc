//! Embedded shell-command parser.
//!
//! Rules that inspect `RUN`, `CMD` and `ENTRYPOINT` need to know which
//! binaries a command line invokes and how. This module provides:
//!
//! - [`lexer`] - shlex-based word splitting
//! - [`chain`] - splitting a command line at `;`, `|`, `||`, `&`, `&&`, `>`, `<`
//! - [`command`] - decomposing one command into env, sudo, binary,
//!   sub-command, options and arguments
//! - [`package`] - the package-manager catalog
//!
//! Parsing never fails. Malformed input degrades to a chain holding one
//! empty command.
//!
//! # Example
//!
//! ```
//! use berth::shell::{BashCommandChain, Operator};
//!
//! let chain = BashCommandChain::parse("echo ok; sudo apt update");
//!
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain.operators(), [Operator::Semi]);
//! assert!(chain.commands()[1].has_sudo);
//! assert_eq!(chain.commands()[1].sub_command(), Some("update"));
//! ```

pub mod chain;
pub mod command;
pub mod lexer;
pub mod package;

pub use chain::{split_chain, BashCommandChain, Operator};
pub use command::{BashCommand, SUDO};
pub use lexer::{lex, ShellInput};
pub use package::{PackageFamily, PackageManager};
