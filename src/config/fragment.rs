//! The configuration fragment: one partial configuration unit

use crate::types::{GlobPattern, RuleEntry, RuleName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule table of a fragment, keyed by rule name
pub type RuleTable = BTreeMap<RuleName, RuleEntry>;

/// Assumed global identifiers: `true` = writable, `false` = read-only
pub type GlobalsTable = BTreeMap<String, bool>;

/// One partial configuration: rules, file scope and environment options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fragment {
    /// Optional label, used in diagnostics only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Presets inserted before this fragment, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    /// File patterns this fragment is scoped to; `None` applies globally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<GlobPattern>>,

    /// File patterns excluded from this fragment (global ignores when alone)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<GlobPattern>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: RuleTable,

    #[serde(default, skip_serializing_if = "LanguageOptions::is_empty")]
    pub language_options: LanguageOptions,

    /// `files` of the fragments that pulled this one in through `extends`,
    /// outermost last. A file must match one pattern of every list.
    #[serde(skip)]
    pub within: Vec<Vec<GlobPattern>>,
}

/// Environment options handed to the engine's parser
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub globals: GlobalsTable,

    /// Opaque pass-through table
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub parser_options: toml::Table,
}

impl LanguageOptions {
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.parser_options.is_empty()
    }
}

impl Fragment {
    /// Creates an empty fragment that applies globally and sets nothing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_files<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.files = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ignores<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.ignores = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extends<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends = presets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rule(mut self, name: RuleName, entry: impl Into<RuleEntry>) -> Self {
        self.rules.insert(name, entry.into());
        self
    }

    pub fn with_global(mut self, identifier: impl Into<String>, writable: bool) -> Self {
        self.language_options
            .globals
            .insert(identifier.into(), writable);
        self
    }

    pub fn with_parser_option(mut self, key: impl Into<String>, value: toml::Value) -> Self {
        self.language_options
            .parser_options
            .insert(key.into(), value);
        self
    }

    /// True when the fragment has no `files` restriction
    pub fn applies_globally(&self) -> bool {
        self.files.is_none()
    }

    /// True when `ignores` is the only thing this fragment sets
    ///
    /// Such a fragment removes matching files from linting entirely instead
    /// of only excluding them from itself.
    pub fn is_global_ignores(&self) -> bool {
        !self.ignores.is_empty()
            && self.extends.is_empty()
            && self.files.is_none()
            && self.rules.is_empty()
            && self.language_options.is_empty()
            && self.within.is_empty()
    }

    /// Human-readable label: the name if set, else the position
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", index),
        }
    }

    /// All glob patterns declared by this fragment
    pub fn patterns(&self) -> impl Iterator<Item = &GlobPattern> {
        self.files
            .iter()
            .flatten()
            .chain(self.ignores.iter())
            .chain(self.within.iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_parse_fragment_table() {
        let fragment: Fragment = toml::from_str(
            r#"
name = "typescript"
files = ["**/*.{ts,tsx}"]

[rules]
"react-hooks/exhaustive-deps" = "error"

[language_options.globals]
window = false

[language_options.parser_options]
project_service = true
"#,
        )
        .unwrap();

        assert_eq!(fragment.name.as_deref(), Some("typescript"));
        assert_eq!(fragment.files.as_ref().unwrap().len(), 1);
        assert_eq!(
            fragment.rules[&RuleName::new("react-hooks/exhaustive-deps").unwrap()].severity,
            Severity::Error
        );
        assert_eq!(fragment.language_options.globals.get("window"), Some(&false));
        assert_eq!(
            fragment.language_options.parser_options.get("project_service"),
            Some(&toml::Value::Boolean(true))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Fragment, _> = toml::from_str("plugins = [\"react\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_global_ignores_detection() {
        assert!(Fragment::new().with_ignores(["dist"]).is_global_ignores());
        assert!(
            Fragment::new()
                .named("build output")
                .with_ignores(["dist"])
                .is_global_ignores()
        );
        assert!(
            !Fragment::new()
                .with_ignores(["dist"])
                .with_files(["**/*.ts"])
                .is_global_ignores()
        );
        assert!(
            !Fragment::new()
                .with_ignores(["dist"])
                .with_global("window", false)
                .is_global_ignores()
        );
        assert!(!Fragment::new().is_global_ignores());
    }

    #[test]
    fn test_applies_globally() {
        assert!(Fragment::new().applies_globally());
        assert!(!Fragment::new().with_files(["*.ts"]).applies_globally());
    }

    #[test]
    fn test_label() {
        assert_eq!(Fragment::new().label(3), "#3");
        assert_eq!(Fragment::new().named("base").label(3), "base");
    }
}
