//! Create a starter lintlayer.toml
//!
//! The starter layers the stock JavaScript, TypeScript and React presets,
//! ignores build output, and turns on the stricter hook and promise rules
//! for TypeScript sources.

use std::fs;
use std::path::Path;

/// Default content for lintlayer.toml
pub(crate) const DEFAULT_LINTLAYER_TOML: &str = r#"[lintlayer]
version = "1"

# Fragments are merged top to bottom; later fragments win.

[[fragment]]
name = "presets"
extends = [
    "js:recommended",
    "typescript:strict-type-checked",
    "react-hooks:recommended",
    "react-refresh:vite",
]

# A fragment holding only `ignores` excludes files from every fragment.
[[fragment]]
ignores = ["dist", "cloudflare", "eslint.config.js"]

[[fragment]]
name = "typescript-sources"
files = ["**/*.{ts,tsx}"]

[[fragment]]
name = "project"
extends = ["globals:browser"]

[fragment.language_options.parser_options]
project_service = true
tsconfig_root_dir = "."

[fragment.rules]
"react-hooks/exhaustive-deps" = "error"
"react-hooks/react-compiler" = "error"
"@typescript-eslint/promise-function-async" = "error"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path '{0}' exists but is not a file")]
    NotAFile(String),
}

/// What `run_init` did with the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Writes the starter config to `path`
///
/// An existing file is left alone unless `force` is set.
pub fn run_init(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if path.exists() {
        if !path.is_file() {
            return Err(InitError::NotAFile(path.display().to_string()));
        }
        if !force {
            return Ok(InitOutcome::Skipped);
        }
        fs::write(path, DEFAULT_LINTLAYER_TOML)?;
        return Ok(InitOutcome::Overwritten);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_LINTLAYER_TOML)?;
    Ok(InitOutcome::Created)
}

/// Runs init and reports the outcome, returning the exit code
pub fn run_init_command(path: &Path, force: bool) -> i32 {
    match run_init(path, force) {
        Ok(InitOutcome::Created) => {
            println!("Created {}", path.display());
            super::common::EXIT_SUCCESS
        }
        Ok(InitOutcome::Overwritten) => {
            println!("Overwrote {}", path.display());
            super::common::EXIT_SUCCESS
        }
        Ok(InitOutcome::Skipped) => {
            println!(
                "{} already exists, leaving it unchanged. Use --force to overwrite.",
                path.display()
            );
            super::common::EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            super::common::EXIT_ERROR
        }
    }
}
