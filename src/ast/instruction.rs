//! Instruction nodes.
//!
//! One struct per instruction kind, gathered in the [`Instruction`] enum. The
//! enum is internally tagged by `kind` so the tokenizer's JSON can be read
//! directly; kinds the linter knows nothing about become
//! [`Instruction::Unrecognized`].

use serde::{Deserialize, Serialize};

use super::position::SourceRange;

/// A `key[=value]` pair as written in `ARG`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgPair {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A `key=value` pair as written in `LABEL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// `ARG name[=default] ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub args: Vec<ArgPair>,
}

/// An instruction carrying a command line: `RUN`, `CMD` or `ENTRYPOINT`.
///
/// In shell form `cmd_line` holds a single string and `prepend_shell` is set.
/// In exec (JSON array) form it holds one element per array item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub cmd_line: Vec<String>,
    pub prepend_shell: bool,
}

/// `COPY [--from=..] [--chown=..] [--chmod=..] src... dest`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    /// Sources followed by the destination as the last element.
    pub sources_and_dest: Vec<String>,
    pub chown: String,
    pub chmod: String,
    pub from: String,
}

impl CopyCommand {
    /// Source paths (everything but the last element).
    pub fn sources(&self) -> &[String] {
        match self.sources_and_dest.split_last() {
            Some((_, sources)) => sources,
            None => &[],
        }
    }

    /// Destination path, if any.
    pub fn dest(&self) -> Option<&str> {
        self.sources_and_dest.last().map(String::as_str)
    }
}

/// `EXPOSE port[/proto] ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposeCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub ports: Vec<String>,
}

/// `LABEL key=value ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub labels: Vec<KeyValue>,
}

/// `MAINTAINER name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintainerCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub maintainer: String,
}

/// `SHELL ["executable", "params"]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub shell: Vec<String>,
}

/// `USER user[:group]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub user: String,
}

/// `WORKDIR path`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkdirCommand {
    pub location: Vec<SourceRange>,
    pub original: String,
    pub path: String,
}

/// A single instruction within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instruction {
    Arg(ArgCommand),
    Cmd(ExecCommand),
    Copy(CopyCommand),
    Entrypoint(ExecCommand),
    Expose(ExposeCommand),
    Label(LabelCommand),
    Maintainer(MaintainerCommand),
    Run(ExecCommand),
    Shell(ShellCommand),
    User(UserCommand),
    Workdir(WorkdirCommand),
    /// Any instruction kind without rules (`ADD`, `ENV`, `HEALTHCHECK`, ...).
    #[serde(other)]
    Unrecognized,
}

impl Instruction {
    /// The instruction's coarse location. Empty for unrecognized instructions.
    pub fn location(&self) -> &[SourceRange] {
        match self {
            Self::Arg(c) => &c.location,
            Self::Cmd(c) | Self::Entrypoint(c) | Self::Run(c) => &c.location,
            Self::Copy(c) => &c.location,
            Self::Expose(c) => &c.location,
            Self::Label(c) => &c.location,
            Self::Maintainer(c) => &c.location,
            Self::Shell(c) => &c.location,
            Self::User(c) => &c.location,
            Self::Workdir(c) => &c.location,
            Self::Unrecognized => &[],
        }
    }

    /// Source text of the instruction as reconstructed by the tokenizer.
    pub fn original(&self) -> &str {
        match self {
            Self::Arg(c) => &c.original,
            Self::Cmd(c) | Self::Entrypoint(c) | Self::Run(c) => &c.original,
            Self::Copy(c) => &c.original,
            Self::Expose(c) => &c.original,
            Self::Label(c) => &c.original,
            Self::Maintainer(c) => &c.original,
            Self::Shell(c) => &c.original,
            Self::User(c) => &c.original,
            Self::Workdir(c) => &c.original,
            Self::Unrecognized => "",
        }
    }
}
