//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Output format for a resolved configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// Human-readable sections
    Human,
    /// One JSON document, as handed to the linting engine
    Json,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// lintlayer CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "lintlayer")]
#[command(about = "Layered lint configuration resolver")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Config file (defaults to ./lintlayer.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available lintlayer subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a starter lintlayer.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load and validate the config file, expanding presets
    Validate,

    /// Print the resolved configuration, for the whole file or one path
    PrintConfig {
        /// File whose configuration to compute
        path: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: ConfigFormat,
    },

    /// List the files the configuration applies to
    LsFiles {
        /// Paths to walk (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Also list ignored and unconfigured files
        #[arg(long)]
        all: bool,
    },

    /// List available presets
    Presets {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_print_config_defaults() {
        let cli = Cli::parse_from(["lintlayer", "print-config"]);
        match cli.command {
            Command::PrintConfig { path, format } => {
                assert_eq!(path, None);
                assert_eq!(format, ConfigFormat::Human);
            }
            _ => panic!("Expected PrintConfig command"),
        }
        assert_eq!(cli.color, ColorChoice::Auto);
        assert_eq!(cli.config, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_print_config_with_path_and_json() {
        let cli = Cli::parse_from(["lintlayer", "print-config", "src/app.tsx", "-f", "json"]);
        match cli.command {
            Command::PrintConfig { path, format } => {
                assert_eq!(path.as_deref(), Some("src/app.tsx"));
                assert_eq!(format, ConfigFormat::Json);
            }
            _ => panic!("Expected PrintConfig command"),
        }
    }

    #[test]
    fn test_ls_files_defaults() {
        let cli = Cli::parse_from(["lintlayer", "ls-files"]);
        match cli.command {
            Command::LsFiles { paths, format, all } => {
                assert_eq!(paths, vec!["."]);
                assert_eq!(format, OutputFormat::Human);
                assert!(!all);
            }
            _ => panic!("Expected LsFiles command"),
        }
    }

    #[test]
    fn test_ls_files_with_paths_and_all() {
        let cli = Cli::parse_from(["lintlayer", "ls-files", "src/", "tests/", "--all", "-f", "jsonl"]);
        match cli.command {
            Command::LsFiles { paths, format, all } => {
                assert_eq!(paths, vec!["src/", "tests/"]);
                assert_eq!(format, OutputFormat::Jsonl);
                assert!(all);
            }
            _ => panic!("Expected LsFiles command"),
        }
    }

    #[test]
    fn test_init_with_force() {
        let cli = Cli::parse_from(["lintlayer", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lintlayer",
            "validate",
            "--config",
            "web/lintlayer.toml",
            "--color",
            "never",
            "-v",
        ]);
        assert!(matches!(cli.command, Command::Validate));
        assert_eq!(cli.config, Some(PathBuf::from("web/lintlayer.toml")));
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.verbose);
    }

    #[test]
    fn test_presets_format() {
        let cli = Cli::parse_from(["lintlayer", "presets", "--format", "jsonl"]);
        assert!(matches!(
            cli.command,
            Command::Presets {
                format: OutputFormat::Jsonl
            }
        ));
    }

    #[test]
    fn test_invalid_format() {
        assert!(Cli::try_parse_from(["lintlayer", "print-config", "--format", "yaml"]).is_err());
        assert!(Cli::try_parse_from(["lintlayer", "ls-files", "--format", "json"]).is_err());
    }

    #[test]
    fn test_help_contains_about() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Layered lint configuration resolver"));
    }
}
