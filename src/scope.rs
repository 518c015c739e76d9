#![forbid(unsafe_code)]

//! Per-file scoping of fragments
//!
//! Patterns are matched against paths relative to the config base directory.
//! `*` does not cross `/`; `**` does. An ignore pattern also ignores everything
//! beneath a matching directory, so `dist` and `dist/` both cover
//! `dist/assets/index.js`.

use crate::config::fragment::Fragment;
use crate::error::ScopeError;
use crate::resolver::{ResolvedConfig, resolve_indexed};
use crate::types::{GlobPattern, RelativePath};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Files matched when no fragment's `files` matches
pub const DEFAULT_FILE_PATTERNS: &[&str] = &["**/*.js", "**/*.mjs", "**/*.cjs"];

/// Directories ignored before any fragment is considered
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["**/node_modules/", ".git/"];

/// Configuration outcome for one file
#[derive(Debug, Clone, PartialEq)]
pub enum FileConfig {
    /// Matched by a global ignore pattern
    Ignored,
    /// Not matched by any `files` pattern nor by the defaults
    Unconfigured,
    /// Merged configuration of every fragment in scope
    Configured(ResolvedConfig),
}

impl FileConfig {
    pub fn status(&self) -> FileStatus {
        match self {
            FileConfig::Ignored => FileStatus::Ignored,
            FileConfig::Unconfigured => FileStatus::Unconfigured,
            FileConfig::Configured(_) => FileStatus::Configured,
        }
    }
}

/// Status of a file without its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileStatus {
    Configured,
    Ignored,
    Unconfigured,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Configured => "configured",
            FileStatus::Ignored => "ignored",
            FileStatus::Unconfigured => "unconfigured",
        }
    }
}

#[derive(Debug)]
struct CompiledScope {
    files: Option<GlobSet>,
    ignores: Option<GlobSet>,
    within: Vec<GlobSet>,
    global_ignores: bool,
}

/// Compiled `files`/`ignores` globs of an expanded fragment list
#[derive(Debug)]
pub struct ScopeMatcher {
    fragments: Vec<Fragment>,
    scopes: Vec<CompiledScope>,
    global_ignores: GlobSet,
    defaults: GlobSet,
}

impl ScopeMatcher {
    /// Compiles every pattern of `fragments`
    ///
    /// Fragments must already be expanded; `extends` is not looked at here.
    pub fn new(fragments: Vec<Fragment>) -> Result<Self, ScopeError> {
        let mut scopes = Vec::with_capacity(fragments.len());
        let mut global_ignores = GlobSetBuilder::new();
        for pattern in DEFAULT_IGNORE_PATTERNS {
            add_ignore_pattern(&mut global_ignores, &GlobPattern::new(*pattern), 0)?;
        }

        for (index, fragment) in fragments.iter().enumerate() {
            let is_global_ignores = fragment.is_global_ignores();
            if is_global_ignores {
                for pattern in &fragment.ignores {
                    add_ignore_pattern(&mut global_ignores, pattern, index)?;
                }
            }

            let files = match &fragment.files {
                Some(patterns) => Some(build_set(patterns, index, false)?),
                None => None,
            };
            let ignores = if fragment.ignores.is_empty() || is_global_ignores {
                None
            } else {
                Some(build_set(&fragment.ignores, index, true)?)
            };

            let within = fragment
                .within
                .iter()
                .map(|patterns| build_set(patterns, index, false))
                .collect::<Result<Vec<_>, _>>()?;

            scopes.push(CompiledScope {
                files,
                ignores,
                within,
                global_ignores: is_global_ignores,
            });
        }

        let global_ignores = global_ignores.build().map_err(|source| ScopeError::InvalidGlob {
            pattern: "<global ignores>".to_string(),
            fragment: 0,
            source,
        })?;

        let defaults: Vec<GlobPattern> = DEFAULT_FILE_PATTERNS
            .iter()
            .map(|p| GlobPattern::new(*p))
            .collect();
        let defaults = build_set(&defaults, 0, false)?;

        Ok(Self {
            fragments,
            scopes,
            global_ignores,
            defaults,
        })
    }

    /// The fragments this matcher was built from
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// True when a global ignore pattern matches the path
    pub fn is_ignored(&self, path: &RelativePath) -> bool {
        self.global_ignores.is_match(path.as_str())
    }

    /// True when some fragment's `files` (or the default patterns) match
    pub fn is_lintable(&self, path: &RelativePath) -> bool {
        if self.defaults.is_match(path.as_str()) {
            return true;
        }
        self.scopes.iter().any(|scope| {
            scope
                .files
                .as_ref()
                .is_some_and(|files| files.is_match(path.as_str()))
                && scope.is_within(path)
                && !scope.excludes(path)
        })
    }

    /// Positions of the fragments that apply to the path, in order
    pub fn matching_fragments(&self, path: &RelativePath) -> Vec<usize> {
        self.scopes
            .iter()
            .enumerate()
            .filter(|(_, scope)| scope.applies_to(path))
            .map(|(index, _)| index)
            .collect()
    }

    /// Status of the path without resolving its configuration
    pub fn status_for_path(&self, path: &RelativePath) -> FileStatus {
        if self.is_ignored(path) {
            FileStatus::Ignored
        } else if !self.is_lintable(path) {
            FileStatus::Unconfigured
        } else {
            FileStatus::Configured
        }
    }

    /// Resolves the configuration that applies to one file
    pub fn config_for_path(&self, path: &RelativePath) -> FileConfig {
        match self.status_for_path(path) {
            FileStatus::Ignored => FileConfig::Ignored,
            FileStatus::Unconfigured => FileConfig::Unconfigured,
            FileStatus::Configured => {
                let matching = self.matching_fragments(path);
                tracing::trace!(path = %path, fragments = ?matching, "resolving file config");
                FileConfig::Configured(resolve_indexed(
                    matching.into_iter().map(|index| (index, &self.fragments[index])),
                ))
            }
        }
    }
}

impl CompiledScope {
    fn excludes(&self, path: &RelativePath) -> bool {
        self.ignores
            .as_ref()
            .is_some_and(|ignores| ignores.is_match(path.as_str()))
    }

    fn is_within(&self, path: &RelativePath) -> bool {
        self.within.iter().all(|set| set.is_match(path.as_str()))
    }

    fn applies_to(&self, path: &RelativePath) -> bool {
        if self.global_ignores || self.excludes(path) || !self.is_within(path) {
            return false;
        }
        match &self.files {
            None => true,
            Some(files) => files.is_match(path.as_str()),
        }
    }
}

fn compile(
    pattern: &str,
    original: &GlobPattern,
    fragment: usize,
) -> Result<globset::Glob, ScopeError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ScopeError::InvalidGlob {
            pattern: original.as_str().to_string(),
            fragment,
            source,
        })
}

fn add_ignore_pattern(
    builder: &mut GlobSetBuilder,
    pattern: &GlobPattern,
    fragment: usize,
) -> Result<(), ScopeError> {
    let trimmed = pattern.as_str().trim_start_matches("./").trim_end_matches('/');
    builder.add(compile(trimmed, pattern, fragment)?);
    if !trimmed.ends_with("**") {
        builder.add(compile(&format!("{}/**", trimmed), pattern, fragment)?);
    }
    Ok(())
}

fn build_set(
    patterns: &[GlobPattern],
    fragment: usize,
    as_ignores: bool,
) -> Result<GlobSet, ScopeError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if as_ignores {
            add_ignore_pattern(&mut builder, pattern, fragment)?;
        } else {
            let trimmed = pattern.as_str().trim_start_matches("./");
            builder.add(compile(trimmed, pattern, fragment)?);
        }
    }
    builder.build().map_err(|source| ScopeError::InvalidGlob {
        pattern: patterns
            .iter()
            .map(GlobPattern::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        fragment,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RuleName, Severity};

    fn rule(name: &str) -> RuleName {
        RuleName::new(name).unwrap()
    }

    fn path(p: &str) -> RelativePath {
        RelativePath::new(p)
    }

    fn web_fragments() -> Vec<Fragment> {
        vec![
            Fragment::new()
                .with_rule(rule("no-unused-vars"), Severity::Error)
                .with_rule(rule("eqeqeq"), Severity::Warn),
            Fragment::new().with_ignores(["dist", "cloudflare", "eslint.config.js"]),
            Fragment::new()
                .with_files(["**/*.{ts,tsx}"])
                .with_rule(rule("no-unused-vars"), Severity::Off),
            Fragment::new()
                .with_global("window", false)
                .with_rule(rule("react-hooks/exhaustive-deps"), Severity::Error),
        ]
    }

    #[test]
    fn test_typescript_fragment_applies_only_to_ts() {
        let matcher = ScopeMatcher::new(web_fragments()).unwrap();

        match matcher.config_for_path(&path("src/app.tsx")) {
            FileConfig::Configured(config) => {
                assert_eq!(config.severity(&rule("no-unused-vars")), Some(Severity::Off));
                assert_eq!(
                    config.severity(&rule("react-hooks/exhaustive-deps")),
                    Some(Severity::Error)
                );
                assert_eq!(config.language_options.globals.get("window"), Some(&false));
                let indices: Vec<_> = config.fragment_indices().into_iter().collect();
                assert_eq!(indices, vec![0, 2, 3]);
            }
            other => panic!("Expected configured file, got {:?}", other),
        }

        match matcher.config_for_path(&path("src/legacy.js")) {
            FileConfig::Configured(config) => {
                assert_eq!(config.severity(&rule("no-unused-vars")), Some(Severity::Error));
            }
            other => panic!("Expected configured file, got {:?}", other),
        }
    }

    #[test]
    fn test_global_ignores() {
        let matcher = ScopeMatcher::new(web_fragments()).unwrap();
        assert_eq!(matcher.config_for_path(&path("dist/index.js")), FileConfig::Ignored);
        assert_eq!(
            matcher.config_for_path(&path("dist/assets/chunk.js")),
            FileConfig::Ignored
        );
        assert_eq!(
            matcher.config_for_path(&path("eslint.config.js")),
            FileConfig::Ignored
        );
        assert_eq!(matcher.status_for_path(&path("src/dist.ts")), FileStatus::Configured);
    }

    #[test]
    fn test_unconfigured_files() {
        let matcher = ScopeMatcher::new(web_fragments()).unwrap();
        assert_eq!(
            matcher.config_for_path(&path("README.md")),
            FileConfig::Unconfigured
        );
        assert_eq!(
            matcher.status_for_path(&path("styles/site.css")),
            FileStatus::Unconfigured
        );
        assert_eq!(matcher.status_for_path(&path("lib/util.mjs")), FileStatus::Configured);
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let matcher = ScopeMatcher::new(vec![
            Fragment::new()
                .with_files(["*.ts"])
                .with_rule(rule("a"), Severity::Error),
        ])
        .unwrap();

        assert!(matcher.is_lintable(&path("main.ts")));
        assert!(!matcher.is_lintable(&path("src/main.ts")));
    }

    #[test]
    fn test_fragment_local_ignores() {
        let matcher = ScopeMatcher::new(vec![
            Fragment::new()
                .with_files(["src/**/*.ts"])
                .with_ignores(["src/generated/"])
                .with_rule(rule("strict"), Severity::Error),
            Fragment::new()
                .with_files(["**/*.ts"])
                .with_rule(rule("loose"), Severity::Warn),
        ])
        .unwrap();

        assert_eq!(matcher.matching_fragments(&path("src/a.ts")), vec![0, 1]);
        assert_eq!(matcher.matching_fragments(&path("src/generated/api.ts")), vec![1]);
        assert!(!matcher.is_ignored(&path("src/generated/api.ts")));
    }

    #[test]
    fn test_ignored_only_by_own_fragment_is_unconfigured() {
        let matcher = ScopeMatcher::new(vec![
            Fragment::new()
                .with_files(["**/*.ts"])
                .with_ignores(["vendor/**"])
                .with_rule(rule("a"), Severity::Error),
        ])
        .unwrap();

        assert_eq!(
            matcher.status_for_path(&path("vendor/lib.ts")),
            FileStatus::Unconfigured
        );
    }

    #[test]
    fn test_default_ignores() {
        let matcher = ScopeMatcher::new(vec![
            Fragment::new().with_rule(rule("semi"), Severity::Error),
        ])
        .unwrap();

        assert_eq!(
            matcher.config_for_path(&path("node_modules/react/index.js")),
            FileConfig::Ignored
        );
        assert_eq!(
            matcher.status_for_path(&path("packages/web/node_modules/vite/bin.mjs")),
            FileStatus::Ignored
        );
        assert_eq!(matcher.status_for_path(&path(".git/hooks/pre-commit.js")), FileStatus::Ignored);
        assert_eq!(
            matcher.status_for_path(&path("src/node_modules.js")),
            FileStatus::Configured
        );
    }

    #[test]
    fn test_within_restricts_fragment_with_own_files() {
        let mut scoped = Fragment::new()
            .with_files(["**/*.ts"])
            .with_rule(rule("no-var"), Severity::Error);
        scoped.within.push(vec![GlobPattern::new("web/**")]);
        let matcher = ScopeMatcher::new(vec![scoped]).unwrap();

        assert_eq!(matcher.matching_fragments(&path("web/src/main.ts")), vec![0]);
        assert!(matcher.matching_fragments(&path("server/index.ts")).is_empty());
        assert_eq!(
            matcher.status_for_path(&path("server/index.ts")),
            FileStatus::Unconfigured
        );
    }

    #[test]
    fn test_invalid_glob_reports_fragment() {
        let result = ScopeMatcher::new(vec![
            Fragment::new(),
            Fragment::new().with_files(["src/[invalid"]),
        ]);

        match result {
            Err(ScopeError::InvalidGlob {
                pattern, fragment, ..
            }) => {
                assert_eq!(pattern, "src/[invalid");
                assert_eq!(fragment, 1);
            }
            other => panic!("Expected invalid glob error, got {:?}", other),
        }
    }
}
