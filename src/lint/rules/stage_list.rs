//! Rules over the whole stage list.

use std::collections::HashSet;

use crate::ast::{Instruction, Stage, UserCommand};
use crate::lint::{Rule, RuleContext, RuleOutcome, Severity, Validator};

pub const STL001: Rule = Rule::new(
    "STL001",
    "Stage name alias must be unique.",
    "Two stages share the same `AS` alias. `COPY --from` and `--target` resolve \
     the alias to one of them only, so the other stage is unreachable by name.",
    Severity::Error,
    Validator::StageList(duplicate_alias),
);

pub const USR001: Rule = Rule::new(
    "USR001",
    "Last USER should not be root.",
    "The container runs as the last USER of the final image. Switch to an \
     unprivileged user once root-only setup is done.",
    Severity::Warning,
    Validator::StageList(last_user_is_root),
);

fn duplicate_alias(stages: &[Stage], ctx: &RuleContext<'_>) -> RuleOutcome {
    let mut seen = HashSet::new();
    let mut outcome = RuleOutcome::pass(ctx.coarse(&[]));

    for stage in stages.iter().filter(|stage| !stage.name.is_empty()) {
        // Aliases are case-insensitive.
        if !seen.insert(stage.name.to_ascii_lowercase()) {
            outcome = outcome
                .mark_violated()
                .with_location(ctx.locate(&stage.name, &stage.location));
        }
    }

    outcome
}

fn last_user_is_root(stages: &[Stage], ctx: &RuleContext<'_>) -> RuleOutcome {
    let last_user = stages
        .iter()
        .flat_map(|stage| &stage.commands)
        .filter_map(|command| match command {
            Instruction::User(user) => Some(user),
            _ => None,
        })
        .last();

    match last_user {
        Some(user) if is_root(user) => {
            RuleOutcome::violation(ctx.locate(&user.user, &user.location))
        }
        _ => RuleOutcome::pass(ctx.coarse(&[])),
    }
}

fn is_root(user: &UserCommand) -> bool {
    let name = user.user.split(':').next().unwrap_or_default();
    name == "root" || name == "0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRange;
    use crate::lint::rules::testing::check_with_text;
    use crate::location::LocationRange;

    fn user(name: &str, line: usize) -> Instruction {
        Instruction::User(UserCommand {
            user: name.to_string(),
            original: format!("USER {}", name),
            location: vec![SourceRange::line(line)],
        })
    }

    #[test]
    fn empty_aliases_never_collide() {
        let stages = vec![Stage::new("alpine"), Stage::new("debian")];
        let outcome = duplicate_alias(&stages, &RuleContext::detached());

        assert!(!outcome.is_violated());
    }

    #[test]
    fn repeated_alias_is_violation() {
        let text = "FROM golang:1.22 AS builder\nFROM rust:1.80 AS builder";
        let stages = vec![
            Stage::new("golang:1.22")
                .with_name("builder")
                .with_location(vec![SourceRange::line(1)]),
            Stage::new("rust:1.80")
                .with_name("builder")
                .with_location(vec![SourceRange::line(2)]),
        ];
        let outcome = check_with_text(duplicate_alias, stages.as_slice(), text);

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(2, 18, 2, 25));
    }

    #[test]
    fn alias_comparison_ignores_case() {
        let stages = vec![
            Stage::new("golang").with_name("Build"),
            Stage::new("golang").with_name("build"),
        ];

        assert!(duplicate_alias(&stages, &RuleContext::detached()).is_violated());
    }

    #[test]
    fn distinct_aliases_pass() {
        let stages = vec![
            Stage::new("golang").with_name("build"),
            Stage::new("alpine").with_name("final"),
        ];

        assert!(!duplicate_alias(&stages, &RuleContext::detached()).is_violated());
    }

    #[test]
    fn last_user_root_is_violation() {
        let text = "FROM alpine\nUSER app\nFROM alpine\nUSER root";
        let stages = vec![
            Stage::new("alpine").with_command(user("app", 2)),
            Stage::new("alpine").with_command(user("root", 4)),
        ];
        let outcome = check_with_text(last_user_is_root, stages.as_slice(), text);

        assert!(outcome.is_violated());
        assert_eq!(outcome.location(), LocationRange::new(4, 5, 4, 9));
    }

    #[test]
    fn earlier_root_is_fine() {
        let stages = vec![Stage::new("alpine")
            .with_command(user("root", 2))
            .with_command(user("app", 3))];

        assert!(!last_user_is_root(&stages, &RuleContext::detached()).is_violated());
    }

    #[test]
    fn root_forms() {
        for name in ["root", "0", "root:root", "0:0"] {
            let stages = vec![Stage::new("alpine").with_command(user(name, 2))];
            assert!(
                last_user_is_root(&stages, &RuleContext::detached()).is_violated(),
                "{}",
                name
            );
        }
        for name in ["rooter", "1000", "app:root"] {
            let stages = vec![Stage::new("alpine").with_command(user(name, 2))];
            assert!(
                !last_user_is_root(&stages, &RuleContext::detached()).is_violated(),
                "{}",
                name
            );
        }
    }

    #[test]
    fn no_user_passes() {
        let stages = vec![Stage::new("alpine")];

        assert!(!last_user_is_root(&stages, &RuleContext::detached()).is_violated());
    }
}
