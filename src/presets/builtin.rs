#![forbid(unsafe_code)]

//! Built-in presets embedded at compile time
//!
//! Each preset lives in `builtin-presets/` as a TOML file and is compiled into
//! the binary with `include_str!`, so the tool runs without external files.

use crate::config::fragment::Fragment;
use crate::error::ConfigError;
use crate::presets::{Preset, PresetSource};
use serde::Deserialize;

const BUILTIN_PRESETS: &[(&str, &str)] = &[
    (
        "js-recommended.toml",
        include_str!("../../builtin-presets/js-recommended.toml"),
    ),
    (
        "typescript-strict-type-checked.toml",
        include_str!("../../builtin-presets/typescript-strict-type-checked.toml"),
    ),
    (
        "react-hooks-recommended.toml",
        include_str!("../../builtin-presets/react-hooks-recommended.toml"),
    ),
    (
        "react-refresh-vite.toml",
        include_str!("../../builtin-presets/react-refresh-vite.toml"),
    ),
    (
        "globals-browser.toml",
        include_str!("../../builtin-presets/globals-browser.toml"),
    ),
    (
        "globals-node.toml",
        include_str!("../../builtin-presets/globals-node.toml"),
    ),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetFile {
    preset: PresetHeader,
    #[serde(default, rename = "fragment")]
    fragments: Vec<Fragment>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetHeader {
    name: String,
    #[serde(default)]
    description: String,
}

/// Parses one preset definition file
pub(crate) fn parse_preset_file(file: &str, content: &str) -> Result<Preset, ConfigError> {
    let parsed: PresetFile = toml::from_str(content)?;
    if parsed.fragments.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Preset file {} defines no fragments",
            file
        )));
    }

    Ok(Preset {
        name: parsed.preset.name,
        description: parsed.preset.description,
        fragments: parsed.fragments,
        source: PresetSource::Builtin,
    })
}

/// Loads every embedded preset
pub fn load_builtin_presets() -> Result<Vec<Preset>, ConfigError> {
    BUILTIN_PRESETS
        .iter()
        .map(|(file, content)| parse_preset_file(file, content))
        .collect()
}
