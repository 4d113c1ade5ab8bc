//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores rules in registration order and indexes them
//! by the node kind they are bound to, so the linter can fetch every rule for
//! a node in a stable order.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::rule::{Rule, RuleId};
use super::rules::builtin_rules;
use crate::ast::NodeKind;
use crate::error::{BerthError, Result};

static BUILTIN: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::with_builtins);

/// Registry of lint rules.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    by_kind: HashMap<NodeKind, Vec<usize>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            if let Err(e) = registry.register(rule) {
                tracing::error!("Skipping built-in rule: {}", e);
            }
        }
        registry
    }

    /// The shared registry of built-in rules, built on first use.
    pub fn builtin() -> &'static RuleRegistry {
        &BUILTIN
    }

    /// Register a lint rule.
    ///
    /// Fails when a rule with the same ID is already registered.
    pub fn register(&mut self, rule: Rule) -> Result<()> {
        if self.get(rule.id).is_some() {
            tracing::error!("Rule {} registered twice", rule.id);
            return Err(BerthError::DuplicateRule {
                id: rule.id.to_string(),
            });
        }
        tracing::trace!("Registering rule {} for {} nodes", rule.id, rule.kind());
        self.by_kind
            .entry(rule.kind())
            .or_default()
            .push(self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Get a rule by ID.
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Get a rule by its textual ID.
    pub fn find(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Rules bound to `kind`, in registration order.
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = &Rule> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&idx| &self.rules[idx])
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
