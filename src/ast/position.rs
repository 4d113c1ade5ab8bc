//! Coarse source positions as supplied by the build-file tokenizer.

use serde::{Deserialize, Serialize};

/// A position in the build file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line (1-indexed).
    pub line: usize,
    /// Character offset within the line (0-indexed).
    pub character: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A coarse source range. Instruction nodes carry a list of these, usually
/// one per physical line the instruction spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    /// Start of the range.
    pub start: Position,
    /// End of the range.
    pub end: Position,
}

impl SourceRange {
    /// Create a range covering a single line, starting at character 0.
    pub const fn line(line: usize) -> Self {
        Self {
            start: Position::new(line, 0),
            end: Position::new(line, 0),
        }
    }

    /// Create a range with precise positions.
    pub const fn new(start_line: usize, start_char: usize, end_line: usize, end_char: usize) -> Self {
        Self {
            start: Position::new(start_line, start_char),
            end: Position::new(end_line, end_char),
        }
    }
}
