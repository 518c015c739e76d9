//! Validate command implementation
//!
//! Loads lintlayer.toml, expands every preset and compiles every glob, so a
//! config that passes here is one the other commands can use.

use crate::cli::common::{CommandError, build_matcher, finish, load_config};
use std::path::Path;

/// Summary of a valid configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub declared: usize,
    pub expanded: usize,
    pub presets: usize,
}

pub(crate) fn validate(config_path: Option<&Path>) -> Result<ValidationSummary, CommandError> {
    let loaded = load_config(config_path)?;
    let matcher = build_matcher(&loaded)?;
    Ok(ValidationSummary {
        declared: loaded.config.fragments.len(),
        expanded: matcher.fragments().len(),
        presets: loaded.config.preset_registry()?.len(),
    })
}

/// Run the validate command
///
/// Exit code:
/// - 0: configuration is valid
/// - 2: configuration error (missing file, bad glob, unknown preset)
/// - 3: invalid TOML
pub fn run_validate(config_path: Option<&Path>) -> i32 {
    finish(validate(config_path).map(|summary| {
        println!(
            "Configuration is valid: {} fragment(s), {} after preset expansion, {} preset(s) available",
            summary.declared, summary.expanded, summary.presets
        );
    }))
}
