//! Node kinds and borrowed nodes used for rule dispatch.

use std::fmt;

use serde::Serialize;

use super::instruction::{
    ArgCommand, CopyCommand, ExecCommand, ExposeCommand, Instruction, LabelCommand,
    MaintainerCommand, ShellCommand, UserCommand, WorkdirCommand,
};
use super::stage::Stage;

/// The closed set of node kinds a rule can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    StageList,
    Stage,
    Arg,
    Cmd,
    Copy,
    Entrypoint,
    Expose,
    Label,
    Maintainer,
    Run,
    Shell,
    User,
    Workdir,
}

impl NodeKind {
    /// Every kind, in traversal order.
    pub const ALL: [NodeKind; 13] = [
        NodeKind::StageList,
        NodeKind::Stage,
        NodeKind::Arg,
        NodeKind::Cmd,
        NodeKind::Copy,
        NodeKind::Entrypoint,
        NodeKind::Expose,
        NodeKind::Label,
        NodeKind::Maintainer,
        NodeKind::Run,
        NodeKind::Shell,
        NodeKind::User,
        NodeKind::Workdir,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::StageList => "stage-list",
            NodeKind::Stage => "stage",
            NodeKind::Arg => "arg",
            NodeKind::Cmd => "cmd",
            NodeKind::Copy => "copy",
            NodeKind::Entrypoint => "entrypoint",
            NodeKind::Expose => "expose",
            NodeKind::Label => "label",
            NodeKind::Maintainer => "maintainer",
            NodeKind::Run => "run",
            NodeKind::Shell => "shell",
            NodeKind::User => "user",
            NodeKind::Workdir => "workdir",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one node of the tree, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    StageList(&'a [Stage]),
    Stage(&'a Stage),
    Arg(&'a ArgCommand),
    Cmd(&'a ExecCommand),
    Copy(&'a CopyCommand),
    Entrypoint(&'a ExecCommand),
    Expose(&'a ExposeCommand),
    Label(&'a LabelCommand),
    Maintainer(&'a MaintainerCommand),
    Run(&'a ExecCommand),
    Shell(&'a ShellCommand),
    User(&'a UserCommand),
    Workdir(&'a WorkdirCommand),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::StageList(_) => NodeKind::StageList,
            Node::Stage(_) => NodeKind::Stage,
            Node::Arg(_) => NodeKind::Arg,
            Node::Cmd(_) => NodeKind::Cmd,
            Node::Copy(_) => NodeKind::Copy,
            Node::Entrypoint(_) => NodeKind::Entrypoint,
            Node::Expose(_) => NodeKind::Expose,
            Node::Label(_) => NodeKind::Label,
            Node::Maintainer(_) => NodeKind::Maintainer,
            Node::Run(_) => NodeKind::Run,
            Node::Shell(_) => NodeKind::Shell,
            Node::User(_) => NodeKind::User,
            Node::Workdir(_) => NodeKind::Workdir,
        }
    }
}

impl Instruction {
    /// Borrow this instruction as a dispatchable node.
    ///
    /// Returns `None` for [`Instruction::Unrecognized`].
    pub fn as_node(&self) -> Option<Node<'_>> {
        let node = match self {
            Instruction::Arg(c) => Node::Arg(c),
            Instruction::Cmd(c) => Node::Cmd(c),
            Instruction::Copy(c) => Node::Copy(c),
            Instruction::Entrypoint(c) => Node::Entrypoint(c),
            Instruction::Expose(c) => Node::Expose(c),
            Instruction::Label(c) => Node::Label(c),
            Instruction::Maintainer(c) => Node::Maintainer(c),
            Instruction::Run(c) => Node::Run(c),
            Instruction::Shell(c) => Node::Shell(c),
            Instruction::User(c) => Node::User(c),
            Instruction::Workdir(c) => Node::Workdir(c),
            Instruction::Unrecognized => return None,
        };
        Some(node)
    }

    /// Kind of this instruction, `None` when unrecognized.
    pub fn kind(&self) -> Option<NodeKind> {
        self.as_node().map(|node| node.kind())
    }
}
