//! Configuration file discovery and loading.

use std::fs;
use std::path::Path;

use crate::config::schema::LintConfig;
use crate::error::{BerthError, Result};

/// File name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".berth.yml";

/// Load the configuration for a run.
///
/// An `explicit` path must exist. Otherwise `.berth.yml` in `dir` is used
/// when present, and the defaults when not.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<LintConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let path = dir.join(DEFAULT_CONFIG_FILE);
    if !path.is_file() {
        tracing::debug!("No {} in {}, using defaults", DEFAULT_CONFIG_FILE, dir.display());
        return Ok(LintConfig::default());
    }
    load_config_file(&path)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LintConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BerthError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BerthError::Io(e)
        }
    })?;

    tracing::debug!("Loading config from {}", path.display());
    parse_config(&content, path)
}

/// Parse YAML content. An empty document yields the defaults.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<LintConfig> {
    if content.trim().is_empty() {
        return Ok(LintConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| BerthError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
