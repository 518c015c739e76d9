//! Ls-files command implementation
//!
//! Walks the given paths and classifies every file against the config:
//! configured (some fragment applies), ignored, or unconfigured.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    CommandError, build_matcher, color_choice, discover_files, finish, load_config,
};
use crate::engine::{CalculationResult, ConfigCalculator};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::Write;
use std::path::Path;
use termcolor::StandardStream;

/// Walks `paths` and classifies each file
///
/// Merged configurations are only computed when `with_configs` is set.
pub(crate) fn list_files(
    config_path: Option<&Path>,
    paths: &[String],
    with_configs: bool,
) -> Result<CalculationResult, CommandError> {
    let loaded = load_config(config_path)?;
    let matcher = build_matcher(&loaded)?;
    let files = discover_files(paths, &loaded.base_dir)?;
    tracing::debug!(files = files.len(), "discovered files");

    let calculator = ConfigCalculator::new(matcher);
    Ok(calculator.calculate(files, with_configs))
}

/// Run the ls-files command
pub fn run_ls_files(
    config_path: Option<&Path>,
    paths: &[String],
    format: OutputFormat,
    all: bool,
    color: ColorChoice,
) -> i32 {
    finish(print(config_path, paths, format, all, color))
}

fn print(
    config_path: Option<&Path>,
    paths: &[String],
    format: OutputFormat,
    all: bool,
    color: ColorChoice,
) -> Result<(), CommandError> {
    let result = list_files(config_path, paths, true)?;

    match format {
        OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_files(&result, all)?);
        }
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(color_choice(color));
            HumanFormatter::new().write_files(&mut stdout, &result, all)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
