//! Configuration fragments and the lintlayer.toml file format

pub mod fragment;
pub mod lintlayer_toml;

pub use fragment::{Fragment, GlobalsTable, LanguageOptions, RuleTable};
pub use lintlayer_toml::{CONFIG_FILE_NAME, Config, LintlayerMeta, PresetDefinition};
