//! Common helper functions shared across CLI commands

use crate::cli::args::ColorChoice;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::engine::file_walker::{FileEntry, FileWalker, FileWalkerError};
use crate::error::{ConfigError, ScopeError};
use crate::scope::ScopeMatcher;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Error type shared by the config-reading commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),

    #[error("Path {0} is outside the config base directory")]
    OutsideBaseDir(PathBuf),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// TOML syntax errors get their own exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Prints the error and maps the outcome to an exit code
pub(crate) fn finish(result: Result<(), CommandError>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// A loaded config file and the directory its globs are relative to
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

/// The config file named by `--config`, else ./lintlayer.toml
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Loads and validates the config file
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = config_path(explicit);

    if !path.exists() {
        return Err(ConfigError::Io {
            path: path.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "config file not found. Run 'lintlayer init' to create it.",
            ),
        });
    }

    let config = Config::load(&path)?;
    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(LoadedConfig {
        config,
        path,
        base_dir,
    })
}

/// Expands presets and compiles the fragment scopes
pub(crate) fn build_matcher(loaded: &LoadedConfig) -> Result<ScopeMatcher, CommandError> {
    let fragments = loaded.config.expanded_fragments()?;
    Ok(ScopeMatcher::new(fragments)?)
}

/// Walks `paths` and collects every file under the base directory
pub(crate) fn discover_files(
    paths: &[String],
    base_dir: &Path,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path_str in paths {
        let walker = FileWalker::new(Path::new(path_str), base_dir)?;
        for result in walker.walk() {
            all_files.push(result?);
        }
    }

    Ok(all_files)
}

/// Maps the CLI color flag onto termcolor for stdout
pub(crate) fn color_choice(choice: ColorChoice) -> termcolor::ColorChoice {
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}
