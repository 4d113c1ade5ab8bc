//! Command-line interface for Berth.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, LintArgs, RulesArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
