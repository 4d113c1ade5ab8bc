//! `RUN` rules about the commands invoked.

use std::sync::LazyLock;

use regex::Regex;

use super::{locate_in_chain, shell_chain};
use crate::ast::ExecCommand;
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};
use crate::shell::SUDO;

/// A `;` directly followed by a control operator. An escaped `\;` is an
/// argument, as in `find -exec ... \;`, and is not matched.
static OPERATOR_AFTER_SEMICOLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\\])(;\s*[|&]{1,2})").expect("OPERATOR_AFTER_SEMICOLON regex must compile")
});

/// Binaries that manage the host or its processes.
const HOST_ONLY_BINARIES: &[&str] = &[
    "free", "kill", "mount", "ps", "reboot", "service", "shutdown", "top",
];

pub const RUN001: Rule = Rule::new(
    "RUN001",
    "Some bash commands make no sense in an ordinary Docker container.",
    "Commands like `service`, `shutdown` or `top` act on a running system. \
     During a build there is no init system and nothing to inspect.",
    Severity::Warning,
    Validator::Run(host_only_commands),
);

pub const RUN003: Rule = Rule::new(
    "RUN003",
    "Operators \"&&, ||, |\" has no affect after semicolon.",
    "`a; && b` is a syntax error in most shells and `a; | b` pipes nothing. \
     Drop the semicolon or the operator.",
    Severity::Error,
    Validator::Run(operator_after_semicolon),
);

pub const RUN004: Rule = Rule::new(
    "RUN004",
    "Do not use sudo as it leads to unpredictable behavior. Use a tool like gosu to enforce root.",
    "sudo has unpredictable TTY and signal-forwarding behavior in a container. \
     Build steps already run as root unless USER says otherwise.",
    Severity::Warning,
    Validator::Run(uses_sudo),
);

pub const RUN007: Rule = Rule::new(
    "RUN007",
    "Use 'WORKDIR' to switch to a directory.",
    "A `cd` only lasts for one RUN. WORKDIR changes the directory for every \
     following instruction and documents it.",
    Severity::Warning,
    Validator::Run(cd_instead_of_workdir),
);

pub const RUN008: Rule = Rule::new(
    "RUN008",
    "Prefer apt-get over apt as the latter does not have a stable CLI.",
    "`apt` is meant for interactive use and warns about its unstable interface \
     when scripted. Use `apt-get` or `apt-cache`.",
    Severity::Warning,
    Validator::Run(uses_apt),
);

fn host_only_commands(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let chain = shell_chain(run);
    chain
        .iter()
        .enumerate()
        .fold(RuleOutcome::pass(ctx.coarse(&run.location)), |acc, (idx, command)| {
            let name = command.bin.rsplit('/').next().unwrap_or_default();
            if HOST_ONLY_BINARIES.contains(&name) {
                acc.mark_violated()
                    .with_location(locate_in_chain(ctx, &chain, idx, &command.bin, &run.location))
            } else {
                acc
            }
        })
}

fn operator_after_semicolon(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&run.location));
    match OPERATOR_AFTER_SEMICOLON.captures(&run.original).and_then(|caps| caps.get(1)) {
        Some(found) => outcome
            .mark_violated()
            .with_message(format!("Probably not what you wanted: {}", found.as_str()))
            .with_location(ctx.locate(found.as_str(), &run.location)),
        None => outcome,
    }
}

fn uses_sudo(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&run.location));
    let chain = shell_chain(run);
    match chain.iter().position(|command| command.has_sudo) {
        Some(idx) => outcome
            .mark_violated()
            .with_location(locate_in_chain(ctx, &chain, idx, SUDO, &run.location)),
        None => outcome,
    }
}

fn cd_instead_of_workdir(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&run.location));
    let chain = shell_chain(run);
    let commands = chain.commands();
    let starts_with_cd = match commands {
        [first, ..] if first.bin == "cd" => true,
        [first, second, ..] => first.bin == "mkdir" && second.bin == "cd",
        _ => false,
    };
    if starts_with_cd {
        outcome
            .mark_violated()
            .with_location(locate_in_chain(ctx, &chain, 0, &commands[0].bin, &run.location))
    } else {
        outcome
    }
}

fn uses_apt(run: &ExecCommand, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&run.location));
    let chain = shell_chain(run);
    match chain.iter().position(|command| command.bin == "apt") {
        Some(idx) => outcome
            .mark_violated()
            .with_location(locate_in_chain(ctx, &chain, idx, "apt", &run.location)),
        None => outcome,
    }
}
