//! Parsing and validation for lintlayer.toml configuration files

use crate::config::fragment::Fragment;
use crate::error::ConfigError;
use crate::presets::{Preset, PresetRegistry, PresetSource};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lintlayer.toml";

/// Main configuration struct for lintlayer.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File metadata
    pub lintlayer: LintlayerMeta,

    /// Presets declared by this file, usable from `extends`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub presets: BTreeMap<String, PresetDefinition>,

    /// Ordered fragments, from `[[fragment]]` tables
    #[serde(default, rename = "fragment")]
    pub fragments: Vec<Fragment>,
}

/// Metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintlayerMeta {
    /// Configuration version (must be "1")
    pub version: String,
}

/// A preset in the config file: one fragment table or an array of them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresetDefinition {
    Many(Vec<Fragment>),
    Single(Fragment),
}

// Dispatch on the TOML shape so field errors inside the fragments surface
impl<'de> Deserialize<'de> for PresetDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = toml::Value::deserialize(deserializer)?;
        match value {
            toml::Value::Array(_) => value
                .try_into()
                .map(PresetDefinition::Many)
                .map_err(D::Error::custom),
            toml::Value::Table(_) => value
                .try_into()
                .map(PresetDefinition::Single)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a fragment table or an array of fragment tables, found {}",
                other.type_str()
            ))),
        }
    }
}

impl PresetDefinition {
    pub fn fragments(&self) -> Vec<Fragment> {
        match self {
            PresetDefinition::Many(fragments) => fragments.clone(),
            PresetDefinition::Single(fragment) => vec![fragment.clone()],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lintlayer.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.lintlayer.version
            )));
        }

        if self.fragments.is_empty() {
            return Err(ConfigError::Validation(
                "No fragments configured. Add at least one [[fragment]] table to lintlayer.toml."
                    .to_string(),
            ));
        }

        for (index, fragment) in self.fragments.iter().enumerate() {
            validate_globs(fragment, &format!("fragment {}", fragment.label(index)))?;
        }

        for (name, definition) in &self.presets {
            let fragments = definition.fragments();
            if fragments.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Preset '{}' defines no fragments",
                    name
                )));
            }
            for fragment in &fragments {
                validate_globs(fragment, &format!("preset '{}'", name))?;
            }
        }

        let registry = self.preset_registry()?;
        for fragment in self.fragments.iter().chain(
            self.presets
                .values()
                .flat_map(|definition| match definition {
                    PresetDefinition::Many(fragments) => fragments.iter().collect::<Vec<_>>(),
                    PresetDefinition::Single(fragment) => vec![fragment],
                }),
        ) {
            for name in &fragment.extends {
                if !registry.contains(name) {
                    return Err(ConfigError::Validation(format!(
                        "Unknown preset '{}' in extends",
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Built-in presets plus the presets declared in this file
    ///
    /// File presets replace built-in presets of the same name.
    pub fn preset_registry(&self) -> Result<PresetRegistry, ConfigError> {
        let mut registry = PresetRegistry::builtin()?;
        for (name, definition) in &self.presets {
            registry.register(Preset {
                name: name.clone(),
                description: String::new(),
                fragments: definition.fragments(),
                source: PresetSource::ConfigFile,
            });
        }
        Ok(registry)
    }

    /// The fragment list with every `extends` expanded
    pub fn expanded_fragments(&self) -> Result<Vec<Fragment>, ConfigError> {
        let registry = self.preset_registry()?;
        let expanded = registry.expand(&self.fragments)?;
        tracing::debug!(
            declared = self.fragments.len(),
            expanded = expanded.len(),
            "expanded presets"
        );
        Ok(expanded)
    }
}

fn validate_globs(fragment: &Fragment, context: &str) -> Result<(), ConfigError> {
    if let Some(files) = &fragment.files
        && files.is_empty()
    {
        return Err(ConfigError::Validation(format!(
            "Empty files list in {}. Omit `files` to apply globally.",
            context
        )));
    }

    for pattern in fragment.patterns() {
        globset::Glob::new(pattern.as_str()).map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid glob pattern '{}' in {}: {}",
                pattern.as_str(),
                context,
                e
            ))
        })?;
    }
    Ok(())
}
