#![forbid(unsafe_code)]

//! lintlayer: layered lint configuration resolver
//!
//! A lint configuration is an ordered list of fragments. Each fragment may
//! scope itself to a set of files, set rule severities and options, and
//! declare globals and parser options. Resolving folds the fragments left to
//! right: for every key the later fragment wins.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod presets;
pub mod resolver;
pub mod scope;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, LintlayerError, PresetError, ScopeError};

// Re-export core domain types for convenient access
pub use config::{Config, Fragment, LanguageOptions};
pub use presets::{Preset, PresetRegistry};
pub use resolver::{ResolvedConfig, ScopeEntry, resolve};
pub use scope::{FileConfig, FileStatus, ScopeMatcher};
pub use types::{GlobPattern, RelativePath, RuleEntry, RuleName, Severity};
