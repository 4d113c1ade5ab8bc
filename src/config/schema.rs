//! Configuration schema.

use serde::Deserialize;

use crate::lint::{OutputFormat, RuleRegistry, Verbosity};

/// Contents of a `.berth.yml` file.
///
/// ```yaml
/// ignore: [RUN002, STS001]
/// format: summary
/// verbosity: high
/// no_color: false
/// strict: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule IDs whose results are dropped before reporting.
    pub ignore: Vec<String>,
    pub format: Option<OutputFormat>,
    pub verbosity: Option<Verbosity>,
    pub no_color: bool,
    /// Fail on any violation, not only errors.
    pub strict: bool,
}

impl LintConfig {
    /// Whether results of `rule_id` should be dropped. IDs compare
    /// case-insensitively.
    pub fn is_ignored(&self, rule_id: &str) -> bool {
        self.ignore.iter().any(|id| id.eq_ignore_ascii_case(rule_id))
    }

    /// Ignored IDs that name no rule in `registry`.
    pub fn unknown_ignores<'a>(&'a self, registry: &RuleRegistry) -> Vec<&'a str> {
        self.ignore
            .iter()
            .map(String::as_str)
            .filter(|id| {
                !registry
                    .iter()
                    .any(|rule| rule.id.as_str().eq_ignore_ascii_case(id))
            })
            .collect()
    }
}
