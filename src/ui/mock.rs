//! Mock UI implementation for testing.

use super::UserInterface;

/// Captures all UI interactions for later assertion.
#[derive(Debug, Default)]
pub struct MockUI {
    output: String,
    warnings: Vec<String>,
    errors: Vec<String>,
    use_color: bool,
}

impl MockUI {
    /// Create a new MockUI without colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything passed to [`UserInterface::output`], concatenated.
    pub fn output_text(&self) -> &str {
        &self.output
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check whether any error contains `needle`.
    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    /// Check whether any warning contains `needle`.
    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn use_color(&self) -> bool {
        self.use_color
    }
}
