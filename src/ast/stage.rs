//! Build stages.

use serde::{Deserialize, Serialize};

use super::instruction::Instruction;
use super::position::SourceRange;

/// A stage: one `FROM` line and every instruction up to the next `FROM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    /// Alias given with `AS`; empty when absent.
    pub name: String,
    /// Base image reference, e.g. `golang:1.22` or `scratch`.
    pub base_name: String,
    /// Value of `--platform`; empty when absent.
    pub platform: String,
    /// Coarse location of the `FROM` line.
    pub location: Vec<SourceRange>,
    /// Instructions in source order.
    pub commands: Vec<Instruction>,
}

impl Stage {
    /// Create a stage for `base_name` with no alias.
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..Default::default()
        }
    }

    /// Set the stage alias.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the coarse location of the `FROM` line.
    pub fn with_location(mut self, location: Vec<SourceRange>) -> Self {
        self.location = location;
        self
    }

    /// Append an instruction.
    pub fn with_command(mut self, command: Instruction) -> Self {
        self.commands.push(command);
        self
    }
}
