//! File discovery and traversal with gitignore support
//!
//! Walks roots with the ignore crate and pairs each file with its path
//! relative to the config base directory, which is what fragment globs are
//! matched against.

use crate::types::RelativePath;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Path is a directory, symlink or other non-file entry
    NotAFile,
    /// File lies outside the config base directory
    OutsideBaseDir,
    /// Version-control metadata
    VcsMetadata,
}

/// Result of file walking - either a file to classify or a skipped entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    File(FileEntry),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as produced by the walk
    pub path: PathBuf,
    /// Path relative to the config base directory
    pub relative: RelativePath,
}

impl FileEntry {
    /// Creates an entry, or None if `path` is not under `base_dir`
    pub fn new(path: PathBuf, base_dir: &Path) -> Option<Self> {
        let relative = relative_to(&path, base_dir)?;
        Some(Self { path, relative })
    }
}

/// Computes `path` relative to `base_dir`
///
/// Falls back to canonical paths when the plain prefix check fails, so
/// symlinked directories compare equal to their targets. The path does not
/// have to exist.
pub fn relative_to(path: &Path, base_dir: &Path) -> Option<RelativePath> {
    if let Ok(stripped) = path.strip_prefix(base_dir) {
        return Some(RelativePath::new(stripped.to_string_lossy().into_owned()));
    }

    let absolute_path = canonicalize_lenient(path)?;
    let canonical_base = base_dir.canonicalize().ok()?;
    absolute_path
        .strip_prefix(&canonical_base)
        .ok()
        .map(|stripped| RelativePath::new(stripped.to_string_lossy().into_owned()))
}

/// Canonicalizes the deepest existing ancestor of `path` and appends the
/// components that do not exist yet
fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Some(
                missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc: PathBuf, part| acc.join(part)),
            );
        }
        missing.push(existing.file_name()?);
        existing = existing.parent()?;
    }
}

/// Iterator over discovered files
pub struct FileWalker {
    walker: ignore::Walk,
    base_dir: PathBuf,
    vcs_set: GlobSet,
    verbose: bool,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Directory (or single file) to walk
    /// * `base_dir` - Directory relative paths are computed against
    pub fn new(root: &Path, base_dir: &Path) -> Result<Self, FileWalkerError> {
        Self::with_verbose(root, base_dir, false)
    }

    /// Creates a new FileWalker that also reports skipped entries when
    /// `verbose` is set
    pub fn with_verbose(
        root: &Path,
        base_dir: &Path,
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        let walker = WalkBuilder::new(root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true)
            .build();

        let mut builder = GlobSetBuilder::new();
        for pattern in ["**/.git/**", ".git/**"] {
            let glob = Glob::new(pattern).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        let vcs_set = builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })?;

        Ok(Self {
            walker,
            base_dir: base_dir.to_path_buf(),
            vcs_set,
            verbose,
        })
    }

    /// Walks the directory tree and returns an iterator over files
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        self.walk_with_skip_info()
            .filter_map(|result| match result {
                Ok(WalkResult::File(file)) => Some(Ok(file)),
                Ok(WalkResult::Skipped { .. }) => None,
                Err(e) => Some(Err(e)),
            })
    }

    /// Walks the directory tree and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let base_dir = self.base_dir;
        let vcs_set = self.vcs_set;
        let verbose = self.verbose;

        let skipped = move |path: &Path, reason: SkipReason| {
            if verbose {
                Some(Ok(WalkResult::Skipped {
                    path: path.to_path_buf(),
                    reason,
                }))
            } else {
                None
            }
        };

        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                let path = entry.path();

                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return skipped(path, SkipReason::NotAFile);
                }

                if vcs_set.is_match(path) {
                    return skipped(path, SkipReason::VcsMetadata);
                }

                match FileEntry::new(path.to_path_buf(), &base_dir) {
                    Some(file) => Some(Ok(WalkResult::File(file))),
                    None => {
                        tracing::debug!(path = %path.display(), "file outside base directory");
                        skipped(path, SkipReason::OutsideBaseDir)
                    }
                }
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}
