#![forbid(unsafe_code)]

//! Fold an ordered list of fragments into one effective configuration
//!
//! Merging is a left fold with last-write-wins on identical keys. A key that
//! a later fragment does not mention keeps its earlier value; the fold never
//! removes entries. Because later fragments win, the result depends on input
//! order.

use crate::config::fragment::{Fragment, GlobalsTable, LanguageOptions, RuleTable};
use crate::types::{GlobPattern, RuleName, Severity};
use serde::Serialize;
use std::collections::BTreeSet;

/// File scope contributed by one fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScopeEntry {
    /// The fragment had no `files` and applies to every file
    Global { fragment: usize },
    /// One `files` pattern of the fragment
    Pattern {
        pattern: GlobPattern,
        fragment: usize,
    },
}

impl ScopeEntry {
    pub fn fragment(&self) -> usize {
        match self {
            ScopeEntry::Global { fragment } | ScopeEntry::Pattern { fragment, .. } => *fragment,
        }
    }
}

/// The merged configuration produced by [`resolve`]
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedConfig {
    pub rules: RuleTable,
    pub language_options: LanguageOptions,
    /// Scopes in fragment order
    pub scopes: Vec<ScopeEntry>,
    /// Ignore patterns in fragment order
    pub ignores: Vec<GlobPattern>,
}

/// Merges `fragments` left to right; later fragments win on identical keys.
///
/// An empty input yields the empty configuration, the identity of the fold.
pub fn resolve<'a, I>(fragments: I) -> ResolvedConfig
where
    I: IntoIterator<Item = &'a Fragment>,
{
    resolve_indexed(fragments.into_iter().enumerate())
}

/// Like [`resolve`], for a subsequence whose fragments keep their original
/// positions; the scope list records those positions.
pub fn resolve_indexed<'a, I>(fragments: I) -> ResolvedConfig
where
    I: IntoIterator<Item = (usize, &'a Fragment)>,
{
    fragments
        .into_iter()
        .fold(ResolvedConfig::default(), |mut acc, (index, fragment)| {
            acc.merge(index, fragment);
            acc
        })
}

impl ResolvedConfig {
    /// Applies one fragment on top of the accumulated configuration
    fn merge(&mut self, index: usize, fragment: &Fragment) {
        merge_rules(&mut self.rules, &fragment.rules);
        merge_globals(
            &mut self.language_options.globals,
            &fragment.language_options.globals,
        );
        for (key, value) in &fragment.language_options.parser_options {
            self.language_options
                .parser_options
                .insert(key.clone(), value.clone());
        }

        match &fragment.files {
            None => self.scopes.push(ScopeEntry::Global { fragment: index }),
            Some(patterns) => {
                self.scopes
                    .extend(patterns.iter().map(|pattern| ScopeEntry::Pattern {
                        pattern: pattern.clone(),
                        fragment: index,
                    }))
            }
        }

        self.ignores.extend(fragment.ignores.iter().cloned());
    }

    /// Collapses the merged rules and options into a single global fragment
    ///
    /// Resolving that fragment alone reproduces these rules and options.
    pub fn to_fragment(&self) -> Fragment {
        Fragment {
            rules: self.rules.clone(),
            language_options: self.language_options.clone(),
            ..Fragment::default()
        }
    }

    /// Effective severity of a rule, None when no fragment set it
    pub fn severity(&self, rule: &RuleName) -> Option<Severity> {
        self.rules.get(rule).map(|entry| entry.severity)
    }

    /// True when the rule is set to `warn` or `error`
    pub fn is_enabled(&self, rule: &RuleName) -> bool {
        matches!(self.severity(rule), Some(Severity::Warn | Severity::Error))
    }

    /// Rules that are not turned off
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleName> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.severity != Severity::Off)
            .map(|(name, _)| name)
    }

    /// Plugin namespaces referenced by any configured rule
    pub fn plugins(&self) -> BTreeSet<&str> {
        self.rules.keys().filter_map(RuleName::plugin).collect()
    }

    /// Index of every fragment that contributed to this configuration
    pub fn fragment_indices(&self) -> BTreeSet<usize> {
        self.scopes.iter().map(ScopeEntry::fragment).collect()
    }
}

fn merge_rules(into: &mut RuleTable, from: &RuleTable) {
    for (name, entry) in from {
        into.insert(name.clone(), entry.clone());
    }
}

fn merge_globals(into: &mut GlobalsTable, from: &GlobalsTable) {
    for (identifier, writable) in from {
        into.insert(identifier.clone(), *writable);
    }
}
