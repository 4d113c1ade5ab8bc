//! Rule outcomes and validation results.

use super::rule::{Rule, RuleId, Severity};
use crate::location::LocationRange;

/// What a validation function returns.
///
/// The violated flag latches: [`latch`](Self::latch) folds each sub-check in
/// with a logical OR, so a compliant item never clears an earlier violation.
/// The only way to lower the flag is to build a new outcome with
/// [`forced`](Self::forced).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RuleOutcome {
    violated: bool,
    message: String,
    location: LocationRange,
}

impl RuleOutcome {
    /// A passing outcome located at `location`.
    pub fn pass(location: LocationRange) -> Self {
        Self {
            violated: false,
            message: String::new(),
            location,
        }
    }

    /// A violated outcome located at `location`.
    pub fn violation(location: LocationRange) -> Self {
        Self {
            violated: true,
            message: String::new(),
            location,
        }
    }

    /// An outcome whose flag is exactly `violated`, regardless of any
    /// earlier accumulation.
    pub fn forced(violated: bool, location: LocationRange) -> Self {
        Self {
            violated,
            message: String::new(),
            location,
        }
    }

    /// Raise the flag if `violated`. Never lowers it.
    pub fn latch(mut self, violated: bool) -> Self {
        self.violated |= violated;
        self
    }

    /// Raise the flag.
    pub fn mark_violated(self) -> Self {
        self.latch(true)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_location(mut self, location: LocationRange) -> Self {
        self.location = location;
        self
    }

    pub fn is_violated(&self) -> bool {
        self.violated
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> LocationRange {
        self.location
    }
}

/// The outcome of one rule on one node, stamped with the rule.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    rule: Rule,
    violated: bool,
    message: String,
    location: LocationRange,
}

impl ValidationResult {
    pub fn new(rule: Rule, outcome: RuleOutcome) -> Self {
        Self {
            rule,
            violated: outcome.violated,
            message: outcome.message,
            location: outcome.location,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn rule_id(&self) -> RuleId {
        self.rule.id
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity
    }

    pub fn definition(&self) -> &'static str {
        self.rule.definition
    }

    pub fn is_violated(&self) -> bool {
        self.violated
    }

    /// The violation message, or the rule's definition when the rule left
    /// it empty.
    pub fn message(&self) -> &str {
        if self.message.is_empty() {
            self.rule.definition
        } else {
            &self.message
        }
    }

    pub fn location(&self) -> LocationRange {
        self.location
    }
}

impl PartialEq for ValidationResult {
    fn eq(&self, other: &Self) -> bool {
        self.rule.id == other.rule.id
            && self.violated == other.violated
            && self.message == other.message
            && self.location == other.location
    }
}

impl Eq for ValidationResult {}
