//! Terminal UI.

use std::io::Write;

use console::Term;

use super::{should_use_colors, BerthTheme, UserInterface};

/// Terminal UI implementation.
///
/// Reports go to stdout; warnings and errors go to stderr so
/// machine-readable reports stay clean.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: BerthTheme,
    use_color: bool,
}

impl TerminalUI {
    /// Create a new terminal UI. Colors are used only when `no_color` is
    /// unset and stdout is a terminal.
    pub fn new(no_color: bool) -> Self {
        let use_color = !no_color && should_use_colors();
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: BerthTheme::for_color(use_color),
            use_color,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn use_color(&self) -> bool {
        self.use_color
    }
}

/// Create the UI for this process.
pub fn create_ui(no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(no_color))
}
