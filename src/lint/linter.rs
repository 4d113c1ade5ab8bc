//! The linter: walks a stage list and dispatches nodes to rules.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, trace, warn};

use super::context::{BuildArgs, RuleContext};
use super::registry::RuleRegistry;
use super::result::ValidationResult;
use crate::ast::{Instruction, Node, Stage};
use crate::location::LocationResolver;

/// Runs every rule of a registry over an instruction tree.
///
/// Results come out in a fixed order: stage-list rules first, then for each
/// stage its stage rules followed by its instructions in source order. Within
/// one node, rules run in registration order.
#[derive(Debug, Clone, Copy)]
pub struct Linter<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> Linter<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Lint `stages`, narrowing locations with `resolver`.
    ///
    /// Passing and violated results are both returned. Filtering is up to the
    /// caller.
    pub fn run(&self, stages: &[Stage], resolver: &LocationResolver) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        if stages.is_empty() {
            debug!("Empty stage list, nothing to lint");
            return results;
        }

        let no_args = BuildArgs::new();
        let ctx = RuleContext::new(resolver, &no_args, &[]);
        self.dispatch(Node::StageList(stages), &ctx, &mut results);

        let mut aliases: Vec<String> = Vec::new();
        for stage in stages {
            debug!("Linting stage {:?} from {}", stage.name, stage.base_name);
            let mut build_args = BuildArgs::new();

            let ctx = RuleContext::new(resolver, &build_args, &aliases);
            self.dispatch(Node::Stage(stage), &ctx, &mut results);

            for instruction in &stage.commands {
                self.lint_instruction(instruction, resolver, &mut build_args, &aliases, &mut results);
            }

            if !stage.name.is_empty() {
                aliases.push(stage.name.clone());
            }
        }

        results
    }

    fn lint_instruction(
        &self,
        instruction: &Instruction,
        resolver: &LocationResolver,
        build_args: &mut BuildArgs,
        aliases: &[String],
        results: &mut Vec<ValidationResult>,
    ) {
        match instruction {
            Instruction::Expose(expose) => {
                let resolved = build_args.resolve_expose(expose);
                let ctx = RuleContext::new(resolver, build_args, aliases);
                self.dispatch(Node::Expose(&resolved), &ctx, results);
            }
            Instruction::Arg(arg) => {
                let ctx = RuleContext::new(resolver, build_args, aliases);
                self.dispatch(Node::Arg(arg), &ctx, results);
                build_args.apply(arg);
            }
            Instruction::Unrecognized => {
                warn!("Skipping instruction without rules");
            }
            other => {
                if let Some(node) = other.as_node() {
                    let ctx = RuleContext::new(resolver, build_args, aliases);
                    self.dispatch(node, &ctx, results);
                }
            }
        }
    }

    fn dispatch(&self, node: Node<'_>, ctx: &RuleContext<'_>, results: &mut Vec<ValidationResult>) {
        for rule in self.registry.rules_for(node.kind()) {
            match panic::catch_unwind(AssertUnwindSafe(|| rule.validate(node, ctx))) {
                Ok(Some(result)) => {
                    trace!(
                        "{} on {} node: violated={} at {}",
                        rule.id,
                        node.kind(),
                        result.is_violated(),
                        result.location()
                    );
                    results.push(result);
                }
                Ok(None) => {}
                Err(_) => error!("Rule {} panicked on a {} node", rule.id, node.kind()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ArgCommand, ArgPair, ExposeCommand, SourceRange, UserCommand, WorkdirCommand,
    };
    use crate::lint::{Rule, RuleOutcome, Severity, Validator};
    use crate::location::LocationRange;

    fn workdir(path: &str) -> Instruction {
        Instruction::Workdir(WorkdirCommand {
            path: path.to_string(),
            location: vec![SourceRange::line(2)],
            ..Default::default()
        })
    }

    fn port_echo(expose: &ExposeCommand, _: &RuleContext<'_>) -> RuleOutcome {
        RuleOutcome::pass(LocationRange::default()).with_message(expose.ports.join(","))
    }

    fn panics(_: &UserCommand, _: &RuleContext<'_>) -> RuleOutcome {
        panic!("rule bug")
    }

    fn always_violated(_: &WorkdirCommand, _: &RuleContext<'_>) -> RuleOutcome {
        RuleOutcome::violation(LocationRange::default())
    }

    fn stage_alias_count(_: &Stage, ctx: &RuleContext<'_>) -> RuleOutcome {
        RuleOutcome::pass(LocationRange::default()).with_message(ctx.stage_aliases().len().to_string())
    }

    #[test]
    fn empty_stage_list_yields_nothing() {
        let linter = Linter::new(RuleRegistry::builtin());
        assert!(linter.run(&[], &LocationResolver::new()).is_empty());
    }

    #[test]
    fn results_follow_traversal_order() {
        let stages = vec![
            Stage::new("alpine:3.20").with_command(workdir("app")),
            Stage::new("debian:12").with_command(workdir("/srv")),
        ];
        let results = Linter::new(RuleRegistry::builtin()).run(&stages, &LocationResolver::new());
        let ids: Vec<&str> = results.iter().map(|r| r.rule_id().as_str()).collect();

        let first_stage = ids.iter().position(|id| *id == "STS001").unwrap();
        let first_workdir = ids.iter().position(|id| *id == "WKD001").unwrap();
        assert_eq!(&ids[..2], ["STL001", "USR001"]);
        assert!(first_stage < first_workdir);

        let violated: Vec<&str> = results
            .iter()
            .filter(|r| r.is_violated())
            .map(|r| r.rule_id().as_str())
            .collect();
        assert_eq!(violated, vec!["WKD001"]);
    }

    #[test]
    fn run_is_idempotent() {
        let stages = vec![Stage::new("ubuntu")
            .with_command(workdir("rel"))
            .with_command(Instruction::Unrecognized)];
        let linter = Linter::new(RuleRegistry::builtin());
        let resolver = LocationResolver::new();

        assert_eq!(linter.run(&stages, &resolver), linter.run(&stages, &resolver));
    }

    #[test]
    fn expose_sees_build_args_declared_before_it() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Rule::new("TST010", "", "", Severity::Info, Validator::Expose(port_echo)))
            .unwrap();
        let arg = Instruction::Arg(ArgCommand {
            args: vec![ArgPair {
                key: "PORT".to_string(),
                value: Some("8080".to_string()),
            }],
            ..Default::default()
        });
        let expose = Instruction::Expose(ExposeCommand {
            ports: vec!["${PORT}/tcp".to_string()],
            ..Default::default()
        });
        let stages = vec![
            Stage::new("alpine")
                .with_command(expose.clone())
                .with_command(arg)
                .with_command(expose.clone()),
            Stage::new("alpine").with_command(expose.clone()),
        ];

        let results = Linter::new(&registry).run(&stages, &LocationResolver::new());
        let messages: Vec<&str> = results.iter().map(|r| r.message()).collect();

        assert_eq!(messages, vec!["${PORT}/tcp", "8080/tcp", "${PORT}/tcp"]);
        match &stages[0].commands[2] {
            Instruction::Expose(e) => assert_eq!(e.ports[0], "${PORT}/tcp"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn panicking_rule_does_not_stop_the_run() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Rule::new("TST011", "", "", Severity::Error, Validator::User(panics)))
            .unwrap();
        registry
            .register(Rule::new(
                "TST012",
                "",
                "",
                Severity::Error,
                Validator::Workdir(always_violated),
            ))
            .unwrap();
        let stages = vec![Stage::new("alpine")
            .with_command(Instruction::User(UserCommand::default()))
            .with_command(workdir("x"))];

        let results = Linter::new(&registry).run(&stages, &LocationResolver::new());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rule_id(), "TST012");
    }

    #[test]
    fn stage_rules_see_only_earlier_aliases() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Rule::new("TST013", "", "", Severity::Info, Validator::Stage(stage_alias_count)))
            .unwrap();
        let stages = vec![
            Stage::new("golang").with_name("build"),
            Stage::new("alpine"),
            Stage::new("build").with_name("final"),
        ];

        let results = Linter::new(&registry).run(&stages, &LocationResolver::new());
        let counts: Vec<&str> = results.iter().map(|r| r.message()).collect();

        assert_eq!(counts, vec!["0", "1", "1"]);
    }
}
