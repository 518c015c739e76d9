//! Presets command implementation

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{self, CommandError, color_choice, finish, load_config};
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::presets::PresetRegistry;
use std::io::Write;
use std::path::Path;
use termcolor::StandardStream;

/// Built-in presets, plus the config file's own presets when one is found
///
/// A missing config file is not an error here; an invalid one is.
pub(crate) fn available_presets(config_path: Option<&Path>) -> Result<PresetRegistry, CommandError> {
    if config_path.is_none() && !common::config_path(None).exists() {
        tracing::debug!("no config file, listing built-in presets only");
        return Ok(PresetRegistry::builtin()?);
    }

    let loaded = load_config(config_path)?;
    Ok(loaded.config.preset_registry()?)
}

/// Run the presets command
pub fn run_presets(config_path: Option<&Path>, format: OutputFormat, color: ColorChoice) -> i32 {
    finish(print(config_path, format, color))
}

fn print(
    config_path: Option<&Path>,
    format: OutputFormat,
    color: ColorChoice,
) -> Result<(), CommandError> {
    let registry = available_presets(config_path)?;

    match format {
        OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_presets(registry.iter())?);
        }
        OutputFormat::Human => {
            let mut stdout = StandardStream::stdout(color_choice(color));
            HumanFormatter::new().write_presets(&mut stdout, registry.iter())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
