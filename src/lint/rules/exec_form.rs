//! Exec-form rules for `CMD` and `ENTRYPOINT`.

use crate::ast::ExecCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

const DESCRIPTION: &str = "In shell form the command runs under `/bin/sh -c`, which does not \
     forward signals. The process never sees SIGTERM and is killed after the stop timeout. \
     Use the JSON array form instead.";

pub const CMD001: Rule = Rule::new(
    "CMD001",
    "Prefer JSON notation array format for CMD and ENTRYPOINT",
    DESCRIPTION,
    Severity::Warning,
    Validator::Cmd(prefer_exec_form),
);

pub const ENT001: Rule = Rule::new(
    "ENT001",
    "Prefer JSON notation array format for CMD and ENTRYPOINT",
    DESCRIPTION,
    Severity::Warning,
    Validator::Entrypoint(prefer_exec_form),
);

fn prefer_exec_form(command: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    // Covers arguments spread over several lines.
    let location = ctx.locate_union(&command.cmd_line, &command.location);
    RuleOutcome::pass(location).latch(command.prepend_shell && !command.cmd_line.is_empty())
}
