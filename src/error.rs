//! Error types for lintlayer
//!
//! The resolver itself never fails; errors come from the layers around it:
//! reading config files, expanding presets and compiling glob scopes.

use std::path::PathBuf;

/// Configuration-file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed TOML that fails validation
    #[error("{0}")]
    Validation(String),

    /// Preset expansion failed
    #[error(transparent)]
    Preset(#[from] PresetError),
}

/// Preset expansion errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    /// `extends` names a preset that is not registered
    #[error("Unknown preset '{0}'")]
    Unknown(String),

    /// A preset (transitively) extends itself
    #[error("Preset cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Glob scope errors
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// A `files` or `ignores` pattern does not compile
    #[error("Invalid glob pattern '{pattern}' in fragment {fragment}: {source}")]
    InvalidGlob {
        pattern: String,
        fragment: usize,
        source: globset::Error,
    },
}

/// Top-level error type for lintlayer
#[derive(Debug, thiserror::Error)]
pub enum LintlayerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
