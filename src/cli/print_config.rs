//! Print-config command implementation
//!
//! Without a path, prints the fold of the whole expanded fragment list. With
//! a path, prints the configuration of that one file: only the fragments
//! whose scope matches it are merged.

use crate::cli::args::{ColorChoice, ConfigFormat};
use crate::cli::common::{CommandError, build_matcher, color_choice, finish, load_config};
use crate::engine::file_walker::relative_to;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::resolver::{ResolvedConfig, resolve};
use crate::scope::FileConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

/// Computes the configuration to print
///
/// Returns the file status alongside so callers can report ignored and
/// unconfigured files.
pub(crate) fn compute(
    config_path: Option<&Path>,
    target: Option<&str>,
) -> Result<FileConfig, CommandError> {
    let loaded = load_config(config_path)?;
    let matcher = build_matcher(&loaded)?;

    let Some(target) = target else {
        return Ok(FileConfig::Configured(resolve(matcher.fragments())));
    };

    let relative = relative_to(Path::new(target), &loaded.base_dir)
        .ok_or_else(|| CommandError::OutsideBaseDir(PathBuf::from(target)))?;
    tracing::debug!(path = %relative, "computing file config");
    Ok(matcher.config_for_path(&relative))
}

/// Run the print-config command
pub fn run_print_config(
    config_path: Option<&Path>,
    target: Option<&str>,
    format: ConfigFormat,
    color: ColorChoice,
) -> i32 {
    finish(print(config_path, target, format, color))
}

fn print(
    config_path: Option<&Path>,
    target: Option<&str>,
    format: ConfigFormat,
    color: ColorChoice,
) -> Result<(), CommandError> {
    let file_config = compute(config_path, target)?;
    let label = target.unwrap_or("<all fragments>");

    match (format, file_config) {
        (ConfigFormat::Json, FileConfig::Configured(config)) => {
            print!("{}", JsonlFormatter::new().format_config(&config)?);
        }
        (ConfigFormat::Json, _) => println!("null"),
        (ConfigFormat::Human, FileConfig::Configured(config)) => {
            write_human(&config, color)?;
        }
        (ConfigFormat::Human, FileConfig::Ignored) => {
            println!("{} is ignored by the configuration", label);
        }
        (ConfigFormat::Human, FileConfig::Unconfigured) => {
            println!("{} is not matched by any fragment", label);
        }
    }
    Ok(())
}

fn write_human(config: &ResolvedConfig, color: ColorChoice) -> Result<(), CommandError> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    HumanFormatter::new().write_config(&mut stdout, config)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RuleName, Severity};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[lintlayer]
version = "1"

[[fragment]]
ignores = ["dist"]

[[fragment]]
rules = { "no-unused-vars" = "off", semi = "warn" }

[[fragment]]
files = ["**/*.{ts,tsx}"]
rules = { "no-unused-vars" = "error" }
"#;

    fn setup() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lintlayer.toml");
        fs::write(&path, CONFIG).unwrap();
        (temp, path)
    }

    fn configured(file_config: FileConfig) -> ResolvedConfig {
        match file_config {
            FileConfig::Configured(config) => config,
            other => panic!("expected a configured file, got {:?}", other.status()),
        }
    }

    #[test]
    fn test_whole_list_folds_every_fragment() {
        let (_temp, path) = setup();
        let config = configured(compute(Some(&path), None).unwrap());

        let rule = RuleName::new("no-unused-vars").unwrap();
        assert_eq!(config.severity(&rule), Some(Severity::Error));
        assert_eq!(config.ignores.len(), 1);
    }

    #[test]
    fn test_file_outside_fragment_scope_keeps_earlier_value() {
        let (temp, path) = setup();
        let target = temp.path().join("src/main.js");
        let config = configured(compute(Some(&path), target.to_str()).unwrap());

        let rule = RuleName::new("no-unused-vars").unwrap();
        assert_eq!(config.severity(&rule), Some(Severity::Off));
    }

    #[test]
    fn test_typescript_file_gets_override() {
        let (temp, path) = setup();
        let target = temp.path().join("src/app.tsx");
        let config = configured(compute(Some(&path), target.to_str()).unwrap());

        let rule = RuleName::new("no-unused-vars").unwrap();
        assert_eq!(config.severity(&rule), Some(Severity::Error));
        assert_eq!(config.fragment_indices().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_ignored_and_unconfigured_files() {
        let (temp, path) = setup();

        let ignored = temp.path().join("dist/bundle.js");
        assert!(matches!(
            compute(Some(&path), ignored.to_str()).unwrap(),
            FileConfig::Ignored
        ));

        let readme = temp.path().join("README.md");
        assert!(matches!(
            compute(Some(&path), readme.to_str()).unwrap(),
            FileConfig::Unconfigured
        ));
    }

    #[test]
    fn test_path_outside_base_dir() {
        let (_temp, path) = setup();
        let other = TempDir::new().unwrap();
        let target = other.path().join("a.js");
        fs::write(&target, "").unwrap();

        let err = compute(Some(&path), target.to_str()).unwrap_err();
        assert!(matches!(err, CommandError::OutsideBaseDir(_)));
    }
}
