//! Diagnostic locations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::SourceRange;

/// A point in the build file: 1-based line, 0-based character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "Line")]
    pub line: usize,
    #[serde(rename = "Char")]
    pub character: usize,
}

impl Location {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// The span a diagnostic points at.
///
/// Ordering is by start then end, which is the order used when merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationRange {
    #[serde(rename = "Start")]
    pub start: Location,
    #[serde(rename = "End")]
    pub end: Location,
}

impl LocationRange {
    /// Create a range with precise positions.
    pub const fn new(start_line: usize, start_char: usize, end_line: usize, end_char: usize) -> Self {
        Self {
            start: Location::new(start_line, start_char),
            end: Location::new(end_line, end_char),
        }
    }

    /// Collapse a node's coarse location into one range.
    ///
    /// Spans from the first range's start to the last range's end. A node
    /// without location information maps to the start of the file.
    pub fn from_source_ranges(ranges: &[SourceRange]) -> Self {
        match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => Self::new(
                first.start.line,
                first.start.character,
                last.end.line,
                last.end.character,
            ),
            _ => Self::new(1, 0, 1, 0),
        }
    }

    /// Smallest range covering every range in `ranges`, or `None` if empty.
    pub fn union(ranges: &[LocationRange]) -> Option<Self> {
        let start = ranges.iter().min()?.start;
        let end = ranges.iter().map(|r| r.end).max()?;
        Some(Self { start, end })
    }

    /// Whether the range starts and ends on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl From<SourceRange> for LocationRange {
    fn from(range: SourceRange) -> Self {
        Self::from_source_ranges(&[range])
    }
}

impl fmt::Display for LocationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.character, self.end.line, self.end.character
        )
    }
}
