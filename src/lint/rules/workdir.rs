//! `WORKDIR` rules.

use crate::ast::WorkdirCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

pub const WKD001: Rule = Rule::new(
    "WKD001",
    "WORKDIR should be an absolute path for clarity and reliability.",
    "A relative WORKDIR is resolved against the previous one, so its meaning \
     depends on every WORKDIR before it, including those of the base image.",
    Severity::Warning,
    Validator::Workdir(absolute_path),
);

fn absolute_path(workdir: &WorkdirCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&workdir.location));
    if is_absolute(&workdir.path) {
        return outcome;
    }
    outcome
        .mark_violated()
        .with_location(ctx.locate(&workdir.path, &workdir.location))
}

/// Unix absolute paths, Windows drive paths, and paths starting with a
/// variable (which usually expands to an absolute path).
fn is_absolute(path: &str) -> bool {
    let path = path.trim_matches('"');
    if path.starts_with('/') || path.starts_with('$') {
        return true;
    }
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some('\\' | '/')) if drive.is_ascii_alphabetic()
    )
}
