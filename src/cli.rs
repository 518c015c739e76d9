//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod init;
pub mod ls_files;
pub mod presets;
pub mod print_config;
pub mod validate;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, ConfigFormat, OutputFormat};
pub use common::{EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, config_path};
