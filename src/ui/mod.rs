//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing reports to stdout and problems to stderr
//! - [`MockUI`] capturing everything for tests
//! - [`BerthTheme`] styles and a box-drawn [`Table`]
//!
//! # Example
//!
//! ```
//! use berth::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.output("Berth summary: Everything looks good.\n");
//! ui.error("Instruction tree not found");
//!
//! assert!(ui.output_text().contains("Everything looks good."));
//! assert_eq!(ui.errors(), ["Instruction tree not found"]);
//! ```

pub mod mock;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BerthTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Write report output exactly as given.
    fn output(&mut self, text: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Whether styled output is wanted.
    fn use_color(&self) -> bool;
}
