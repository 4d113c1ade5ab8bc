//! Rules command implementation.
//!
//! The `berth rules` command prints the built-in rule catalog.

use serde::Serialize;

use crate::cli::args::RulesArgs;
use crate::error::Result;
use crate::lint::{Rule, RuleId, RuleRegistry, Severity};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CatalogEntry {
    #[serde(rename = "ID")]
    id: RuleId,
    severity: Severity,
    definition: &'static str,
    description: &'static str,
    reference: &'static str,
}

impl From<&Rule> for CatalogEntry {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            severity: rule.severity,
            definition: rule.definition,
            description: rule.description,
            reference: rule.docs_reference(),
        }
    }
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(args: RulesArgs) -> Self {
        Self { args }
    }

    fn render_table(registry: &RuleRegistry) -> String {
        let mut table = Table::new(&["ID", "Severity", "Definition", "Reference"]);
        for rule in registry.iter() {
            table.add_row(&[
                rule.id.as_str().to_string(),
                rule.severity.to_string(),
                rule.definition.to_string(),
                rule.docs_reference().to_string(),
            ]);
        }
        format!("{}\n", table.render())
    }

    fn render_json(registry: &RuleRegistry) -> Result<String> {
        let entries: Vec<CatalogEntry> = registry.iter().map(CatalogEntry::from).collect();
        Ok(format!("{}\n", serde_json::to_string_pretty(&entries)?))
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = RuleRegistry::builtin();
        let output = if self.args.json {
            Self::render_json(registry)?
        } else {
            Self::render_table(registry)
        };
        ui.output(&output);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn table_lists_every_rule() {
        let mut ui = MockUI::new();
        RulesCommand::new(RulesArgs::default()).execute(&mut ui).unwrap();

        let output = ui.output_text();
        assert!(output.contains("│ ID "));
        for rule in RuleRegistry::builtin().iter() {
            assert!(output.contains(rule.id.as_str()), "{}", rule.id);
        }
    }

    #[test]
    fn json_carries_catalog_fields() {
        let mut ui = MockUI::new();
        RulesCommand::new(RulesArgs { json: true }).execute(&mut ui).unwrap();

        let catalog: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        let entries = catalog.as_array().unwrap();
        assert_eq!(entries.len(), RuleRegistry::builtin().len());

        let mtr = entries.iter().find(|e| e["ID"] == "MTR001").unwrap();
        assert_eq!(mtr["Severity"], "Deprecation");
        assert_eq!(
            mtr["Reference"],
            "https://docs.docker.com/engine/reference/builder/#maintainer-deprecated"
        );
        assert!(mtr["Description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}
