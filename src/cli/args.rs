//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::lint::{OutputFormat, Verbosity};

/// Berth - Static analysis for container build files.
#[derive(Debug, Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .berth.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint an instruction tree
    Lint(LintArgs),

    /// List the built-in rules
    Rules(RulesArgs),
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LintArgs {
    /// Instruction tree produced by the tokenizer, as JSON
    pub ast: PathBuf,

    /// Build file the tree was produced from, used to narrow locations
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Detail level of the summary report
    #[arg(long, value_enum)]
    pub verbosity: Option<Verbosity>,

    /// Fail on any violation, not only errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lint_takes_positional_tree() {
        let cli = Cli::parse_from(["berth", "lint", "tree.json"]);

        match cli.command {
            Commands::Lint(args) => {
                assert_eq!(args.ast, PathBuf::from("tree.json"));
                assert!(args.source.is_none());
                assert!(args.format.is_none());
                assert!(!args.strict);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn lint_parses_value_enums() {
        let cli = Cli::parse_from([
            "berth",
            "lint",
            "tree.json",
            "--source",
            "Dockerfile",
            "--format",
            "json",
            "--verbosity",
            "high",
            "--strict",
        ]);

        match cli.command {
            Commands::Lint(args) => {
                assert_eq!(args.source, Some(PathBuf::from("Dockerfile")));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.verbosity, Some(Verbosity::High));
                assert!(args.strict);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["berth", "rules", "--json", "--debug", "--config", "ci.yml"]);

        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("ci.yml")));
        assert!(matches!(cli.command, Commands::Rules(RulesArgs { json: true })));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["berth", "lint", "t.json", "--format", "sarif"]).is_err());
    }
}
