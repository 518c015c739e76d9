//! lintlayer CLI entry point

use clap::Parser;
use lintlayer::cli::{Command, args::Cli, config_path};
use std::process;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let exit_code = match cli.command {
        Command::Init { force } => {
            lintlayer::cli::init::run_init_command(&config_path(config), force)
        }
        Command::Validate => lintlayer::cli::validate::run_validate(config),
        Command::PrintConfig { path, format } => lintlayer::cli::print_config::run_print_config(
            config,
            path.as_deref(),
            format,
            cli.color,
        ),
        Command::LsFiles { paths, format, all } => {
            lintlayer::cli::ls_files::run_ls_files(config, &paths, format, all, cli.color)
        }
        Command::Presets { format } => {
            lintlayer::cli::presets::run_presets(config, format, cli.color)
        }
    };

    process::exit(exit_code);
}
