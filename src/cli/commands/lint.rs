//! Lint command implementation.
//!
//! The `berth lint` command reads an instruction tree, runs the built-in
//! rules over it and prints a report.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::ast::Stage;
use crate::cli::args::LintArgs;
use crate::config::{load_config, LintConfig};
use crate::error::{BerthError, Result};
use crate::lint::{
    JsonFormatter, LintFormatter, Linter, OutputFormat, RuleRegistry, Severity,
    SummaryFormatter, ValidationResult,
};
use crate::location::LocationResolver;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: LintArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    fn load_config(&self) -> Result<LintConfig> {
        let explicit = self.config_path.as_deref().map(|path| self.resolve(path));
        load_config(explicit.as_deref(), &self.project_root)
    }

    fn load_resolver(&self) -> Result<LocationResolver> {
        let Some(source) = &self.args.source else {
            debug!("No build file given, locations stay coarse");
            return Ok(LocationResolver::new());
        };
        let path = self.resolve(source);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read build file {}", path.display()))?;
        Ok(LocationResolver::from_text(&text))
    }

    /// Format violations in the requested format.
    fn format_output(
        &self,
        results: &[ValidationResult],
        config: &LintConfig,
        use_color: bool,
    ) -> Result<String> {
        let mut output = Vec::new();
        match self.args.format.or(config.format).unwrap_or_default() {
            OutputFormat::Summary => {
                let verbosity = self.args.verbosity.or(config.verbosity).unwrap_or_default();
                SummaryFormatter::new(use_color, verbosity).format(results, &mut output)?;
            }
            OutputFormat::Json => JsonFormatter::new().format(results, &mut output)?,
        }
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Read the stage list the tokenizer wrote to `path`.
pub fn read_stages(path: &Path) -> Result<Vec<Stage>> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => BerthError::AstNotFound {
            path: path.to_path_buf(),
        },
        _ => BerthError::Io(err),
    })?;
    serde_json::from_str(&content).map_err(|err| BerthError::AstParseError {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load_config()?;
        let registry = RuleRegistry::builtin();
        for id in config.unknown_ignores(registry) {
            ui.warning(&format!("Ignored rule {} does not exist", id));
        }

        let stages = read_stages(&self.resolve(&self.args.ast))?;
        let resolver = self.load_resolver()?;

        let violations: Vec<ValidationResult> = Linter::new(registry)
            .run(&stages, &resolver)
            .into_iter()
            .filter(|result| result.is_violated())
            .filter(|result| !config.is_ignored(result.rule_id().as_str()))
            .collect();
        debug!("{} violations after filtering", violations.len());

        let use_color = ui.use_color() && !config.no_color;
        let output = self.format_output(&violations, &config, use_color)?;
        ui.output(&output);

        let strict = self.args.strict || config.strict;
        let should_fail = if strict {
            !violations.is_empty()
        } else {
            violations.iter().any(|v| v.severity() == Severity::Error)
        };

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
