//! Lint rule definitions.
//!
//! This module provides the core types for defining lint rules:
//!
//! - [`Rule`] - A rule's metadata plus its validation function
//! - [`Validator`] - The validation function, tagged by the node kind it accepts
//! - [`RuleId`] - Stable `XXXnnn` identifier of a rule
//! - [`Severity`] - Severity level reported with a violation

use std::fmt;

use serde::Serialize;

use super::context::RuleContext;
use super::docs::docs_reference;
use super::result::{RuleOutcome, ValidationResult};
use crate::ast::{
    ArgCommand, CopyCommand, ExecCommand, ExposeCommand, LabelCommand, MaintainerCommand, Node,
    NodeKind, ShellCommand, Stage, UserCommand, WorkdirCommand,
};

/// Unique identifier for a lint rule, e.g. `RUN004`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(&'static str);

impl RuleId {
    /// Create a new rule ID.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The three-letter category prefix (`RUN` for `RUN004`).
    pub fn category(&self) -> &'static str {
        self.0.get(..3).unwrap_or(self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for RuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RuleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Severity level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// The build is broken or behaves unexpectedly.
    Error,
    /// Works, but is fragile or wasteful.
    Warning,
    /// Informational.
    Info,
    /// Uses a deprecated instruction.
    Deprecation,
    Unknown,
}

impl Severity {
    /// Every severity, in report order.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Deprecation,
        Severity::Unknown,
    ];

    /// Diagnostic severity code used by editors.
    pub fn lsp_code(&self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info | Severity::Unknown => 3,
            Severity::Deprecation => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Info => write!(f, "Info"),
            Severity::Deprecation => write!(f, "Deprecation"),
            Severity::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A validation function, tagged by the node kind it accepts.
///
/// Binding the function type to the variant means a rule can only ever be
/// registered for the kind its function understands.
#[derive(Debug, Clone, Copy)]
pub enum Validator {
    StageList(fn(&[Stage], &RuleContext<'_>) -> RuleOutcome),
    Stage(fn(&Stage, &RuleContext<'_>) -> RuleOutcome),
    Arg(fn(&ArgCommand, &RuleContext<'_>) -> RuleOutcome),
    Cmd(fn(&ExecCommand, &RuleContext<'_>) -> RuleOutcome),
    Copy(fn(&CopyCommand, &RuleContext<'_>) -> RuleOutcome),
    Entrypoint(fn(&ExecCommand, &RuleContext<'_>) -> RuleOutcome),
    Expose(fn(&ExposeCommand, &RuleContext<'_>) -> RuleOutcome),
    Label(fn(&LabelCommand, &RuleContext<'_>) -> RuleOutcome),
    Maintainer(fn(&MaintainerCommand, &RuleContext<'_>) -> RuleOutcome),
    Run(fn(&ExecCommand, &RuleContext<'_>) -> RuleOutcome),
    Shell(fn(&ShellCommand, &RuleContext<'_>) -> RuleOutcome),
    User(fn(&UserCommand, &RuleContext<'_>) -> RuleOutcome),
    Workdir(fn(&WorkdirCommand, &RuleContext<'_>) -> RuleOutcome),
}

impl Validator {
    /// The node kind this validator accepts.
    pub fn kind(&self) -> NodeKind {
        match self {
            Validator::StageList(_) => NodeKind::StageList,
            Validator::Stage(_) => NodeKind::Stage,
            Validator::Arg(_) => NodeKind::Arg,
            Validator::Cmd(_) => NodeKind::Cmd,
            Validator::Copy(_) => NodeKind::Copy,
            Validator::Entrypoint(_) => NodeKind::Entrypoint,
            Validator::Expose(_) => NodeKind::Expose,
            Validator::Label(_) => NodeKind::Label,
            Validator::Maintainer(_) => NodeKind::Maintainer,
            Validator::Run(_) => NodeKind::Run,
            Validator::Shell(_) => NodeKind::Shell,
            Validator::User(_) => NodeKind::User,
            Validator::Workdir(_) => NodeKind::Workdir,
        }
    }

    fn call(&self, node: Node<'_>, ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
        let outcome = match (*self, node) {
            (Validator::StageList(f), Node::StageList(n)) => f(n, ctx),
            (Validator::Stage(f), Node::Stage(n)) => f(n, ctx),
            (Validator::Arg(f), Node::Arg(n)) => f(n, ctx),
            (Validator::Cmd(f), Node::Cmd(n)) => f(n, ctx),
            (Validator::Copy(f), Node::Copy(n)) => f(n, ctx),
            (Validator::Entrypoint(f), Node::Entrypoint(n)) => f(n, ctx),
            (Validator::Expose(f), Node::Expose(n)) => f(n, ctx),
            (Validator::Label(f), Node::Label(n)) => f(n, ctx),
            (Validator::Maintainer(f), Node::Maintainer(n)) => f(n, ctx),
            (Validator::Run(f), Node::Run(n)) => f(n, ctx),
            (Validator::Shell(f), Node::Shell(n)) => f(n, ctx),
            (Validator::User(f), Node::User(n)) => f(n, ctx),
            (Validator::Workdir(f), Node::Workdir(n)) => f(n, ctx),
            _ => return None,
        };
        Some(outcome)
    }
}

/// A lint rule: metadata plus a validation function for one node kind.
///
/// Rules are plain data and are never mutated after registration.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    /// One-line statement of what is checked. Used as the message when a
    /// violation carries none of its own.
    pub definition: &'static str,
    /// Longer explanation shown in verbose reports.
    pub description: &'static str,
    pub severity: Severity,
    pub validator: Validator,
}

impl Rule {
    /// Create a new rule.
    pub const fn new(
        id: &'static str,
        definition: &'static str,
        description: &'static str,
        severity: Severity,
        validator: Validator,
    ) -> Self {
        Self {
            id: RuleId::new(id),
            definition,
            description,
            severity,
            validator,
        }
    }

    /// The node kind this rule is bound to.
    pub fn kind(&self) -> NodeKind {
        self.validator.kind()
    }

    /// Run the rule on `node` and stamp the outcome with this rule.
    ///
    /// Returns `None`, and logs, when `node` is not of the rule's kind.
    pub fn validate(&self, node: Node<'_>, ctx: &RuleContext<'_>) -> Option<ValidationResult> {
        match self.validator.call(node, ctx) {
            Some(outcome) => Some(ValidationResult::new(*self, outcome)),
            None => {
                tracing::error!(
                    "Rule {} expects a {} node, got {}",
                    self.id,
                    self.kind(),
                    node.kind()
                );
                None
            }
        }
    }

    /// Documentation URL for this rule's category.
    pub fn docs_reference(&self) -> &'static str {
        docs_reference(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::WorkdirCommand;
    use crate::location::LocationRange;

    fn always_violated(_: &WorkdirCommand, _: &RuleContext<'_>) -> RuleOutcome {
        RuleOutcome::violation(LocationRange::new(1, 0, 1, 7))
    }

    const TEST_RULE: Rule = Rule::new(
        "TST001",
        "Always violated.",
        "",
        Severity::Info,
        Validator::Workdir(always_violated),
    );

    #[test]
    fn rule_id_category() {
        assert_eq!(RuleId::new("RUN004").category(), "RUN");
        assert_eq!(RuleId::new("X").category(), "X");
    }

    #[test]
    fn rule_id_display() {
        assert_eq!(format!("{}", RuleId::new("CPY001")), "CPY001");
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "Error");
        assert_eq!(format!("{}", Severity::Deprecation), "Deprecation");
    }

    #[test]
    fn severity_lsp_codes() {
        assert_eq!(Severity::Error.lsp_code(), 1);
        assert_eq!(Severity::Warning.lsp_code(), 2);
        assert_eq!(Severity::Info.lsp_code(), 3);
        assert_eq!(Severity::Deprecation.lsp_code(), 4);
        assert_eq!(Severity::Unknown.lsp_code(), 3);
    }

    #[test]
    fn validator_kind_matches_variant() {
        assert_eq!(TEST_RULE.kind(), NodeKind::Workdir);
    }

    #[test]
    fn validate_stamps_rule_on_result() {
        let node = WorkdirCommand::default();
        let result = TEST_RULE
            .validate(Node::Workdir(&node), &RuleContext::detached())
            .unwrap();

        assert_eq!(result.rule_id(), "TST001");
        assert_eq!(result.severity(), Severity::Info);
        assert!(result.is_violated());
        assert_eq!(result.message(), "Always violated.");
    }

    #[test]
    fn validate_rejects_wrong_kind() {
        let user = UserCommand::default();

        assert!(TEST_RULE
            .validate(Node::User(&user), &RuleContext::detached())
            .is_none());
    }
}
