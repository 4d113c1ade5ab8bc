//! Instruction tree consumed by the linter.
//!
//! The tree is produced by an external build-file tokenizer and handed to
//! Berth as JSON: a list of [`Stage`]s, each holding its [`Instruction`]s.
//! Positions are coarse, usually whole lines. The linter never mutates it.
//!
//! # Example
//!
//! ```
//! use berth::ast::{NodeKind, Stage};
//!
//! let json = r#"[{"base_name": "alpine:3.20", "commands": [
//!     {"kind": "workdir", "path": "/app"}
//! ]}]"#;
//! let stages: Vec<Stage> = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(stages[0].commands[0].kind(), Some(NodeKind::Workdir));
//! ```

pub mod instruction;
pub mod node;
pub mod position;
pub mod stage;

pub use instruction::{
    ArgCommand, ArgPair, CopyCommand, ExecCommand, ExposeCommand, Instruction, KeyValue,
    LabelCommand, MaintainerCommand, ShellCommand, UserCommand, WorkdirCommand,
};
pub use node::{Node, NodeKind};
pub use position::{Position, SourceRange};
pub use stage::Stage;
