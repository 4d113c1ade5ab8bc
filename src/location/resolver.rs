//! Raw-text location resolution.
//!
//! The tokenizer only reports whole-line positions. [`LocationResolver`] keeps
//! the document's raw lines and narrows a coarse window down to the exact span
//! of a piece of text, so diagnostics can point at the offending token.
//!
//! Offsets are counted in characters, not bytes.

use super::range::LocationRange;
use crate::ast::SourceRange;

/// Holds one document's lines.
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    lines: Vec<String>,
}

impl LocationResolver {
    /// Create an uninitialized resolver.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a resolver holding `text`.
    pub fn from_text(text: &str) -> Self {
        let mut resolver = Self::new();
        resolver.update(text);
        resolver
    }

    /// Replace the held document. Empty text leaves the resolver uninitialized.
    pub fn update(&mut self, text: &str) {
        self.lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect()
        };
    }

    /// Whether a document has been loaded.
    pub fn is_initialized(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of lines held.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Find the first exact occurrence of `needle` inside `window`.
    ///
    /// - no ranges: the whole document
    /// - one range: that range's start line, from its start character
    /// - several ranges: first range's start line through last range's end
    ///   line, the first line searched from the first range's start character
    ///
    /// Returns `None` when the resolver is uninitialized, `needle` is empty,
    /// or nothing matches.
    pub fn find(&self, needle: &str, window: &[SourceRange]) -> Option<LocationRange> {
        self.search(needle, window, false)
    }

    /// Like [`find`](Self::find), but only matches `needle` as a whole shell
    /// word, so `apt` does not match inside `apt-get`.
    pub fn find_token(&self, needle: &str, window: &[SourceRange]) -> Option<LocationRange> {
        self.search(needle, window, true)
    }

    /// Like [`find_token`](Self::find_token), but the search starts after
    /// `preceding` words have been found in order.
    ///
    /// Walking the words of earlier commands first keeps a word repeated in a
    /// command chain from resolving to an earlier command. Preceding words
    /// that cannot be found are skipped. When `needle` is not found past them
    /// the whole window is searched again.
    pub fn find_token_after<S: AsRef<str>>(
        &self,
        preceding: &[S],
        needle: &str,
        window: &[SourceRange],
    ) -> Option<LocationRange> {
        if needle.is_empty() {
            return None;
        }
        let (first, last, skip) = self.bounds(window)?;

        let mut cursor = (first, skip);
        for word in preceding.iter().map(AsRef::as_ref).filter(|word| !word.is_empty()) {
            match self.scan(word, cursor, last, false) {
                Some(found) => cursor = (found.end.line - 1, found.end.character),
                None => tracing::trace!("{:?} not found while skipping earlier words", word),
            }
        }

        self.scan(needle, cursor, last, true)
            .or_else(|| self.scan(needle, (first, skip), last, true))
    }

    fn search(&self, needle: &str, window: &[SourceRange], whole_word: bool) -> Option<LocationRange> {
        if needle.is_empty() {
            return None;
        }
        let (first, last, skip) = self.bounds(window)?;
        self.scan(needle, (first, skip), last, whole_word)
    }

    /// Zero-based first line, exclusive last line and start character of
    /// `window`, clamped to the document.
    fn bounds(&self, window: &[SourceRange]) -> Option<(usize, usize, usize)> {
        if !self.is_initialized() {
            return None;
        }
        let (first, last, skip) = match window {
            [] => (0, self.lines.len(), 0),
            [only] => (only.start.line.saturating_sub(1), only.start.line, only.start.character),
            [head, .., tail] => (head.start.line.saturating_sub(1), tail.end.line, head.start.character),
        };
        let last = last.min(self.lines.len());
        (first < last).then_some((first, last, skip))
    }

    /// Find `needle` from the zero-based `(line, character)` cursor up to
    /// line `last` (exclusive).
    fn scan(
        &self,
        needle: &str,
        (from_line, from_char): (usize, usize),
        last: usize,
        whole_word: bool,
    ) -> Option<LocationRange> {
        for line_idx in from_line..last {
            let line = &self.lines[line_idx];
            let skip = if line_idx == from_line { from_char } else { 0 };
            let Some(offset) = byte_offset(line, skip) else {
                continue;
            };
            let found = line[offset..]
                .match_indices(needle)
                .map(|(idx, _)| offset + idx)
                .find(|&idx| !whole_word || is_word_boundary(line, idx, idx + needle.len()));
            if let Some(byte_idx) = found {
                let start = line[..byte_idx].chars().count();
                let end = start + needle.chars().count();
                return Some(LocationRange::new(line_idx + 1, start, line_idx + 1, end));
            }
        }
        None
    }

    /// Exact span of `needle`, falling back to the coarse `window`.
    ///
    /// An uninitialized resolver always yields the coarse range unchanged.
    pub fn string_location(&self, needle: &str, window: &[SourceRange]) -> LocationRange {
        match self.find(needle, window) {
            Some(range) => range,
            None => {
                if self.is_initialized() {
                    tracing::trace!("no exact location for {:?}, using coarse range", needle);
                }
                LocationRange::from_source_ranges(window)
            }
        }
    }

    /// Exact span of `needle` as a whole word, falling back to the coarse
    /// `window`.
    pub fn token_location(&self, needle: &str, window: &[SourceRange]) -> LocationRange {
        self.find_token(needle, window)
            .unwrap_or_else(|| LocationRange::from_source_ranges(window))
    }

    /// Exact spans of every needle found in `window`.
    ///
    /// Needles that cannot be found are dropped. When none can be found, or
    /// there are none, the result is the single coarse range.
    pub fn string_slice_location<S: AsRef<str>>(
        &self,
        needles: &[S],
        window: &[SourceRange],
    ) -> Vec<LocationRange> {
        let found: Vec<LocationRange> = needles
            .iter()
            .filter_map(|needle| self.find(needle.as_ref(), window))
            .collect();

        if found.is_empty() {
            vec![LocationRange::from_source_ranges(window)]
        } else {
            found
        }
    }

    /// One span covering every needle found in `window`.
    pub fn union_location<S: AsRef<str>>(&self, needles: &[S], window: &[SourceRange]) -> LocationRange {
        let ranges = self.string_slice_location(needles, window);
        LocationRange::union(&ranges).unwrap_or_else(|| LocationRange::from_source_ranges(window))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=')
}

fn is_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn byte_offset(line: &str, chars: usize) -> Option<usize> {
    if chars == 0 {
        return Some(0);
    }
    match line.char_indices().nth(chars) {
        Some((idx, _)) => Some(idx),
        None => (line.chars().count() == chars).then_some(line.len()),
    }
}
