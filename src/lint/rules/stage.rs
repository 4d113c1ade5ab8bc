//! Rules over a single stage.

use super::image::ImageRef;
use crate::ast::{ExecCommand, Instruction, Stage};
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};
use crate::location::LocationRange;

pub const STS001: Rule = Rule::new(
    "STS001",
    "Stage name should have an explicit tag.",
    "Without a tag the base image resolves to `latest`, which changes under \
     you between builds.",
    Severity::Warning,
    Validator::Stage(missing_tag),
);

pub const STS002: Rule = Rule::new(
    "STS002",
    "Stage name \"latest\" is prone to future errors.",
    "`latest` is a moving target. Pin a version so rebuilds are reproducible.",
    Severity::Warning,
    Validator::Stage(latest_tag),
);

pub const STS003: Rule = Rule::new(
    "STS003",
    "Platform should be specified in build tool and not FROM.",
    "A hard-coded `--platform` in FROM prevents building for other targets. \
     Pass the platform to the build tool, or use `$BUILDPLATFORM`/`$TARGETPLATFORM`.",
    Severity::Warning,
    Validator::Stage(explicit_platform),
);

pub const STS004: Rule = Rule::new(
    "STS004",
    "There should only be 1 CMD and/or ENTRYPOINT command.",
    "Only the last CMD and the last ENTRYPOINT of a stage take effect. Earlier \
     ones are silently ignored.",
    Severity::Warning,
    Validator::Stage(repeated_entry_commands),
);

pub const CPY006: Rule = Rule::new(
    "CPY006",
    "COPY --from value should not be the same as the stage.",
    "A stage cannot copy from itself. `--from` naming the current stage alias \
     or its own base image is almost always a typo.",
    Severity::Error,
    Validator::Stage(copy_from_self),
);

/// Base images that are checked by tag rules: not `scratch`, not templated,
/// not an earlier stage, not pinned by digest.
fn tagged_image<'a>(stage: &'a Stage, ctx: &RuleContext<'_>) -> Option<ImageRef<'a>> {
    let base = stage.base_name.as_str();
    if base.is_empty() || base == "scratch" || base.contains('$') || ctx.is_earlier_stage(base) {
        return None;
    }
    let image = ImageRef::parse(base);
    (!image.has_digest).then_some(image)
}

fn missing_tag(stage: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&stage.location));
    match tagged_image(stage, ctx) {
        Some(image) if image.tag.is_none() => outcome
            .mark_violated()
            .with_message(format!("Image \"{}\" should have an explicit tag.", image.name))
            .with_location(ctx.locate(&stage.base_name, &stage.location)),
        _ => outcome,
    }
}

fn latest_tag(stage: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&stage.location));
    match tagged_image(stage, ctx) {
        Some(image) if image.tag == Some("latest") => outcome
            .mark_violated()
            .with_message(format!(
                "Image \"{}\" should not use \"latest\" as tag.",
                image.name
            ))
            .with_location(ctx.locate(&stage.base_name, &stage.location)),
        _ => outcome,
    }
}

fn explicit_platform(stage: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let outcome = RuleOutcome::pass(ctx.coarse(&stage.location));
    if stage.platform.is_empty() || stage.platform.starts_with('$') {
        return outcome;
    }
    outcome
        .mark_violated()
        .with_message("Specifying platform at build tool level gives more flexibility.")
        .with_location(ctx.locate(&stage.platform, &stage.location))
}

fn repeated_entry_commands(stage: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut cmds = Vec::new();
    let mut entrypoints = Vec::new();
    for command in &stage.commands {
        match command {
            Instruction::Cmd(cmd) => cmds.push(cmd),
            Instruction::Entrypoint(entrypoint) => entrypoints.push(entrypoint),
            _ => {}
        }
    }

    let mut outcome = RuleOutcome::pass(ctx.coarse(&stage.location));
    let mut messages = Vec::new();
    for (repeated, keyword) in [(&cmds, "CMD"), (&entrypoints, "ENTRYPOINT")] {
        if let Some(second) = repeated.get(1) {
            messages.push(format!("More than 1 {} command.", keyword));
            outcome = outcome
                .mark_violated()
                .with_location(locate_keyword(second, keyword, ctx));
        }
    }

    if messages.is_empty() {
        outcome
    } else {
        outcome.with_message(messages.join(" "))
    }
}

/// Location of the instruction keyword as written, which may be lowercase.
fn locate_keyword(command: &ExecCommand, keyword: &str, ctx: &RuleContext<'_>) -> LocationRange {
    let written = command
        .original
        .get(..keyword.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(keyword))
        .unwrap_or(keyword);
    ctx.locate(written, &command.location)
}

fn copy_from_self(stage: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::pass(ctx.coarse(&[]));
    for command in &stage.commands {
        let Instruction::Copy(copy) = command else {
            continue;
        };
        if copy.from.is_empty() {
            continue;
        }
        let from_self = copy.from == stage.name
            || copy.from == stage.base_name
            || ImageRef::same_image(&copy.from, &stage.base_name);
        if from_self {
            outcome = outcome
                .mark_violated()
                .with_location(ctx.locate(&copy.from, &copy.location));
        }
    }
    outcome
}
