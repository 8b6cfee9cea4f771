// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input file discovery with gitignore support.
//!
//! Files named on the command line are scanned as given. Directories are
//! walked with the `ignore` crate, which applies `.gitignore` rules.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::ScanConfig;
use crate::error::{Error, Result};

/// Directories never descended into.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &[".git"];

fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. } => is_loop_error(err),
        ignore::Error::WithDepth { err, .. } => is_loop_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub skip_hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            git_ignore: true,
            skip_hidden: true,
        }
    }
}

impl From<&ScanConfig> for WalkerConfig {
    fn from(scan: &ScanConfig) -> Self {
        Self {
            git_ignore: scan.git_ignore,
            skip_hidden: !scan.hidden,
        }
    }
}

/// Statistics from a walk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub files_found: usize,
    pub symlink_loops: usize,
    pub errors: usize,
}

/// Expands command-line paths into the files to scan.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Expand `paths` into a sorted, deduplicated file list.
    ///
    /// A missing path is an error. Unreadable entries inside a directory
    /// are logged and skipped.
    pub fn expand(&self, paths: &[PathBuf]) -> Result<(Vec<PathBuf>, WalkStats)> {
        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for path in paths {
            let meta = std::fs::metadata(path).map_err(|e| Error::Io {
                path: path.clone(),
                source: e,
            })?;
            if meta.is_dir() {
                self.walk_dir(path, &mut files, &mut stats);
            } else {
                files.push(path.clone());
            }
        }

        files.sort();
        files.dedup();
        stats.files_found = files.len();
        tracing::debug!(files = stats.files_found, errors = stats.errors, "expanded inputs");
        Ok((files, stats))
    }

    fn walk_dir(&self, root: &Path, files: &mut Vec<PathBuf>, stats: &mut WalkStats) {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.skip_hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .follow_links(true)
            .filter_entry(|entry| {
                !entry.file_type().is_some_and(|t| t.is_dir())
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
            });

        for entry in builder.build() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    if is_loop_error(&err) {
                        tracing::warn!("Symlink loop detected: {}", err);
                        stats.symlink_loops += 1;
                    } else {
                        tracing::warn!("Walk error: {}", err);
                        stats.errors += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
