//! Error types for Berth operations.
//!
//! This module defines [`BerthError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Linting itself never fails: malformed shell input, unresolvable
//!   locations and unknown instructions degrade and are logged
//! - Use `BerthError` for input and setup errors that need distinct handling
//! - Use `anyhow::Error` (via `BerthError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Berth operations.
#[derive(Debug, Error)]
pub enum BerthError {
    /// Instruction tree file not found.
    #[error("Instruction tree not found: {path}")]
    AstNotFound { path: PathBuf },

    /// Failed to deserialize the instruction tree.
    #[error("Failed to parse instruction tree at {path}: {message}")]
    AstParseError { path: PathBuf, message: String },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A rule with the same ID is already registered.
    #[error("Rule '{id}' is already registered")]
    DuplicateRule { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Berth operations.
pub type Result<T> = std::result::Result<T, BerthError>;
