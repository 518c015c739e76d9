#![forbid(unsafe_code)]

//! Parallel per-file configuration calculation
//!
//! The compiled scope matcher is immutable, so it is shared by reference
//! across rayon workers and each file is classified independently.

use crate::engine::file_walker::FileEntry;
use crate::resolver::ResolvedConfig;
use crate::scope::{FileConfig, FileStatus, ScopeMatcher};
use crate::types::RelativePath;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome for one discovered file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub relative: RelativePath,
    pub status: FileStatus,
    /// Present only for configured files when configs were requested
    pub config: Option<ResolvedConfig>,
}

/// Result of classifying all files
#[derive(Debug, Default)]
pub struct CalculationResult {
    /// Reports sorted by relative path
    pub reports: Vec<FileReport>,
    pub configured: usize,
    pub ignored: usize,
    pub unconfigured: usize,
}

impl CalculationResult {
    pub fn files_seen(&self) -> usize {
        self.reports.len()
    }
}

/// Computes per-file configurations in parallel
pub struct ConfigCalculator {
    matcher: Arc<ScopeMatcher>,
}

impl ConfigCalculator {
    pub fn new(matcher: ScopeMatcher) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    pub fn matcher(&self) -> &ScopeMatcher {
        &self.matcher
    }

    /// Classifies every file; with `with_configs` the merged configuration
    /// of each configured file is attached to its report
    pub fn calculate(&self, files: Vec<FileEntry>, with_configs: bool) -> CalculationResult {
        let mut reports: Vec<FileReport> = files
            .into_par_iter()
            .map(|file| self.calculate_file(file, with_configs))
            .collect();

        reports.sort_by(|a, b| a.relative.cmp(&b.relative));
        reports.dedup_by(|a, b| a.relative == b.relative);

        let mut result = CalculationResult::default();
        for report in &reports {
            match report.status {
                FileStatus::Configured => result.configured += 1,
                FileStatus::Ignored => result.ignored += 1,
                FileStatus::Unconfigured => result.unconfigured += 1,
            }
        }
        result.reports = reports;

        tracing::debug!(
            configured = result.configured,
            ignored = result.ignored,
            unconfigured = result.unconfigured,
            "classified files"
        );
        result
    }

    fn calculate_file(&self, file: FileEntry, with_configs: bool) -> FileReport {
        let (status, config) = if with_configs {
            match self.matcher.config_for_path(&file.relative) {
                FileConfig::Configured(config) => (FileStatus::Configured, Some(config)),
                other => (other.status(), None),
            }
        } else {
            (self.matcher.status_for_path(&file.relative), None)
        };

        FileReport {
            path: file.path,
            relative: file.relative,
            status,
            config,
        }
    }
}
