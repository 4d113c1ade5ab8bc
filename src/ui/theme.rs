//! Visual theme and styling.

use console::Style;

use crate::lint::Severity;

/// Berth's visual theme.
#[derive(Debug, Clone)]
pub struct BerthTheme {
    /// Style for Error-severity findings (red bold).
    pub error: Style,
    /// Style for Warning-severity findings (yellow).
    pub warning: Style,
    /// Style for Info-severity findings (blue).
    pub info: Style,
    /// Style for deprecations (cyan).
    pub deprecation: Style,
    /// Style for findings of unknown severity (white).
    pub unknown: Style,
    /// Style for success messages (green).
    pub success: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for key labels (bold).
    pub key: Style,
}

impl Default for BerthTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BerthTheme {
    /// Create the default Berth theme.
    pub fn new() -> Self {
        Self {
            error: Style::new().red().bold(),
            warning: Style::new().yellow(),
            info: Style::new().blue(),
            deprecation: Style::new().cyan(),
            unknown: Style::new().white(),
            success: Style::new().green(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            error: Style::new(),
            warning: Style::new(),
            info: Style::new(),
            deprecation: Style::new(),
            unknown: Style::new(),
            success: Style::new(),
            dim: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_color(use_color: bool) -> Self {
        if use_color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Style used for a severity group.
    pub fn severity(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Error => &self.error,
            Severity::Warning => &self.warning,
            Severity::Info => &self.info,
            Severity::Deprecation => &self.deprecation,
            Severity::Unknown => &self.unknown,
        }
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
