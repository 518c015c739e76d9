#![forbid(unsafe_code)]

//! Named presets and `extends` expansion
//!
//! A preset is a named list of fragments. When a fragment lists presets in
//! `extends`, their fragments are inserted immediately before it, in listed
//! order, so the extending fragment still overrides them.

pub mod builtin;

use crate::config::fragment::Fragment;
use crate::error::{ConfigError, PresetError};
use std::collections::BTreeMap;

/// Where a preset was defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSource {
    Builtin,
    ConfigFile,
}

impl PresetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetSource::Builtin => "builtin",
            PresetSource::ConfigFile => "config",
        }
    }
}

/// A named, ordered list of fragments
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub fragments: Vec<Fragment>,
    pub source: PresetSource,
}

/// Registry of presets available to `extends`
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: BTreeMap<String, Preset>,
}

impl PresetRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the embedded presets
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for preset in builtin::load_builtin_presets()? {
            registry.register(preset);
        }
        Ok(registry)
    }

    /// Adds a preset; a preset with the same name is replaced
    pub fn register(&mut self, preset: Preset) {
        if let Some(previous) = self.presets.get(&preset.name) {
            tracing::debug!(
                preset = %preset.name,
                replaced = previous.source.as_str(),
                "preset overridden"
            );
        }
        self.presets.insert(preset.name.clone(), preset);
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Presets sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Replaces every `extends` with the preset fragments it names
    ///
    /// The result contains no `extends`. Scope of the extending fragment is
    /// carried into the inserted fragments: those without `files` take the
    /// extending fragment's `files`, those with their own `files` must match
    /// both lists, and its `ignores` are appended to theirs.
    pub fn expand(&self, fragments: &[Fragment]) -> Result<Vec<Fragment>, PresetError> {
        let mut expanded = Vec::with_capacity(fragments.len());
        let mut stack = Vec::new();
        for fragment in fragments {
            self.expand_into(fragment, &mut stack, &mut expanded)?;
        }
        Ok(expanded)
    }

    fn expand_into(
        &self,
        fragment: &Fragment,
        stack: &mut Vec<String>,
        out: &mut Vec<Fragment>,
    ) -> Result<(), PresetError> {
        for name in &fragment.extends {
            if stack.contains(name) {
                let mut cycle = stack.clone();
                cycle.push(name.clone());
                return Err(PresetError::Cycle(cycle));
            }
            let preset = self
                .get(name)
                .ok_or_else(|| PresetError::Unknown(name.clone()))?;

            stack.push(name.clone());
            let mut inserted = Vec::new();
            for preset_fragment in &preset.fragments {
                self.expand_into(preset_fragment, stack, &mut inserted)?;
            }
            stack.pop();

            tracing::trace!(preset = %name, fragments = inserted.len(), "expanded preset");
            out.extend(
                inserted
                    .into_iter()
                    .map(|inner| inherit_scope(inner, fragment)),
            );
        }

        let mut own = fragment.clone();
        own.extends.clear();
        // Only ignores left: they were already applied to the inserted
        // fragments and must not turn into global ignores.
        if !fragment.extends.is_empty() && own.is_global_ignores() {
            return Ok(());
        }
        out.push(own);
        Ok(())
    }
}

fn inherit_scope(mut inner: Fragment, outer: &Fragment) -> Fragment {
    if inner.is_global_ignores() {
        return inner;
    }
    match (&inner.files, &outer.files) {
        (None, files) => inner.files = files.clone(),
        (Some(_), Some(files)) => inner.within.push(files.clone()),
        (Some(_), None) => {}
    }
    inner.within.extend(outer.within.iter().cloned());
    inner.ignores.extend(outer.ignores.iter().cloned());
    inner
}
