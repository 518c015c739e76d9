#![forbid(unsafe_code)]

//! Core domain types for lintlayer
//!
//! Rule names, severities and rule entries are the values stored in a
//! fragment's rule table. They are passed through to the consuming engine
//! without checking whether the engine actually knows the rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Rule severity as understood by the consuming engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "SeverityRepr")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

/// Accepted spellings of a severity: a name or the numeric level 0-2
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Name(String),
    Level(i64),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = String;

    fn try_from(repr: SeverityRepr) -> Result<Self, String> {
        match repr {
            SeverityRepr::Name(name) => Severity::from_name(&name),
            SeverityRepr::Level(level) => Severity::from_level(level),
        }
    }
}

impl Severity {
    /// Parses `off`, `warn` or `error` (`warning` is accepted as an alias)
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "off" => Ok(Severity::Off),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity '{}', expected \"off\", \"warn\" or \"error\"",
                other
            )),
        }
    }

    /// Parses the numeric form: 0 = off, 1 = warn, 2 = error
    pub fn from_level(level: i64) -> Result<Self, String> {
        match level {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            other => Err(format!("invalid severity level {}, expected 0, 1 or 2", other)),
        }
    }

    /// Reads a severity out of a TOML value (the head of a rule array)
    pub fn from_value(value: &toml::Value) -> Result<Self, String> {
        match value {
            toml::Value::String(name) => Severity::from_name(name),
            toml::Value::Integer(level) => Severity::from_level(*level),
            other => Err(format!("expected a severity, found {}", other.type_str())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule-table value: a bare severity or a severity followed by options
///
/// Options are opaque to lintlayer and forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleEntryRepr", into = "RuleEntryRepr")]
pub struct RuleEntry {
    pub severity: Severity,
    pub options: Vec<toml::Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RuleEntryRepr {
    Bare(Severity),
    List(Vec<toml::Value>),
}

impl TryFrom<RuleEntryRepr> for RuleEntry {
    type Error = String;

    fn try_from(repr: RuleEntryRepr) -> Result<Self, Self::Error> {
        match repr {
            RuleEntryRepr::Bare(severity) => Ok(RuleEntry::new(severity)),
            RuleEntryRepr::List(mut items) => {
                if items.is_empty() {
                    return Err("rule entry array must start with a severity".to_string());
                }
                let severity = Severity::from_value(&items.remove(0))?;
                Ok(RuleEntry {
                    severity,
                    options: items,
                })
            }
        }
    }
}

impl From<RuleEntry> for RuleEntryRepr {
    fn from(entry: RuleEntry) -> Self {
        if entry.options.is_empty() {
            RuleEntryRepr::Bare(entry.severity)
        } else {
            let mut items = Vec::with_capacity(entry.options.len() + 1);
            items.push(toml::Value::String(entry.severity.as_str().to_string()));
            items.extend(entry.options);
            RuleEntryRepr::List(items)
        }
    }
}

impl RuleEntry {
    /// Creates an entry with no options
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    /// Creates an entry carrying rule options
    pub fn with_options(severity: Severity, options: Vec<toml::Value>) -> Self {
        Self { severity, options }
    }
}

impl From<Severity> for RuleEntry {
    fn from(severity: Severity) -> Self {
        RuleEntry::new(severity)
    }
}

static PLUGIN_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[^/\s]+(?:/[^/\s]+)?|[^@/\s][^/\s]*)/([^/\s]+)$")
        .expect("plugin rule pattern is valid")
});

/// A rule identifier such as `eqeqeq` or `@typescript-eslint/no-explicit-any`
///
/// Only emptiness and whitespace are rejected; whether the engine knows the
/// rule is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    /// Returns None if the name is empty or contains whitespace
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return None;
        }
        Some(RuleName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plugin namespace of the rule, None for core rules
    ///
    /// `react-hooks/exhaustive-deps` -> `react-hooks`,
    /// `@typescript-eslint/no-explicit-any` -> `@typescript-eslint`,
    /// `@scope/plugin/rule` -> `@scope/plugin`.
    pub fn plugin(&self) -> Option<&str> {
        PLUGIN_RULE
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleName::new(value.clone()).ok_or_else(|| format!("Invalid rule name '{}'", value))
    }
}

impl From<RuleName> for String {
    fn from(name: RuleName) -> Self {
        name.0
    }
}

/// A path relative to the config base directory, used for glob matching
///
/// Paths are normalized to forward slashes, without a leading `./` or a
/// trailing slash; the base directory itself is ".".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    pub fn new(path: impl Into<String>) -> Self {
        RelativePath(Self::normalize(path.into()))
    }

    fn normalize(mut path: String) -> String {
        path = path.replace('\\', "/");

        while path.ends_with('/') && path.len() > 1 {
            path.pop();
        }

        while let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        }

        if path.is_empty() || path == "/" || path == "." {
            return ".".to_string();
        }

        path
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RelativePath {
    fn from(value: String) -> Self {
        RelativePath::new(value)
    }
}

impl From<&str> for RelativePath {
    fn from(value: &str) -> Self {
        RelativePath::new(value)
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.0
    }
}

/// A glob pattern for file matching, compiled later with `globset`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Table {
        rules: std::collections::BTreeMap<RuleName, RuleEntry>,
    }

    #[test]
    fn test_rule_name_validation() {
        assert!(RuleName::new("eqeqeq").is_some());
        assert!(RuleName::new("react-hooks/exhaustive-deps").is_some());
        assert!(RuleName::new("@typescript-eslint/promise-function-async").is_some());
        assert!(RuleName::new("").is_none());
        assert!(RuleName::new("no unused").is_none());
    }

    #[test]
    fn test_rule_name_plugin() {
        let plugin = |s: &str| RuleName::new(s).unwrap().plugin().map(str::to_string);
        assert_eq!(plugin("eqeqeq"), None);
        assert_eq!(plugin("react-hooks/exhaustive-deps").as_deref(), Some("react-hooks"));
        assert_eq!(
            plugin("@typescript-eslint/no-explicit-any").as_deref(),
            Some("@typescript-eslint")
        );
        assert_eq!(plugin("@scope/plugin/rule").as_deref(), Some("@scope/plugin"));
    }

    #[test]
    fn test_severity_spellings() {
        let table: Table = toml::from_str(
            r#"
[rules]
a = "off"
b = "warn"
c = "error"
d = 0
e = 1
f = 2
g = "warning"
"#,
        )
        .unwrap();

        let get = |k: &str| table.rules[&RuleName::new(k).unwrap()].severity;
        assert_eq!(get("a"), Severity::Off);
        assert_eq!(get("b"), Severity::Warn);
        assert_eq!(get("c"), Severity::Error);
        assert_eq!(get("d"), Severity::Off);
        assert_eq!(get("e"), Severity::Warn);
        assert_eq!(get("f"), Severity::Error);
        assert_eq!(get("g"), Severity::Warn);
    }

    #[test]
    fn test_invalid_severity() {
        assert!(toml::from_str::<Table>("[rules]\na = \"fatal\"\n").is_err());
        assert!(toml::from_str::<Table>("[rules]\na = 3\n").is_err());
        assert!(toml::from_str::<Table>("[rules]\na = []\n").is_err());
    }

    #[test]
    fn test_rule_entry_with_options() {
        let table: Table = toml::from_str(
            r#"
[rules]
"no-magic-numbers" = ["warn", { ignore = [0, 1] }]
quotes = [2, "single"]
"#,
        )
        .unwrap();

        let magic = &table.rules[&RuleName::new("no-magic-numbers").unwrap()];
        assert_eq!(magic.severity, Severity::Warn);
        assert_eq!(magic.options.len(), 1);
        assert!(magic.options[0].is_table());

        let quotes = &table.rules[&RuleName::new("quotes").unwrap()];
        assert_eq!(quotes.severity, Severity::Error);
        assert_eq!(quotes.options, vec![toml::Value::String("single".into())]);
    }

    #[test]
    fn test_rule_entry_serializes_like_input() {
        let bare = serde_json::to_value(RuleEntry::new(Severity::Error)).unwrap();
        assert_eq!(bare, serde_json::json!("error"));

        let with_options = RuleEntry::with_options(
            Severity::Warn,
            vec![toml::Value::String("always".into())],
        );
        assert_eq!(
            serde_json::to_value(with_options).unwrap(),
            serde_json::json!(["warn", "always"])
        );
    }

    #[test]
    fn test_relative_path_normalization() {
        assert_eq!(RelativePath::new("").as_str(), ".");
        assert_eq!(RelativePath::new("./").as_str(), ".");
        assert_eq!(RelativePath::new("src/").as_str(), "src");
        assert_eq!(RelativePath::new("./src/app.tsx").as_str(), "src/app.tsx");
        assert_eq!(RelativePath::new("src\\lib\\a.ts").as_str(), "src/lib/a.ts");
    }
}
