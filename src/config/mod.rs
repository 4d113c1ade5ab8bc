//! Configuration loading and parsing for Berth.
//!
//! Configuration is optional. Berth looks for `.berth.yml` in the current
//! directory unless `--config` names another file; command-line flags win
//! over file values.
//!
//! # Example
//!
//! ```
//! use berth::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".berth.yml"), "ignore: [RUN002]\nstrict: true").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert!(config.strict);
//! assert!(config.is_ignored("RUN002"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::LintConfig;
