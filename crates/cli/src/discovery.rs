// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Looks for acmatch.toml in the starting directory and its ancestors,
//! stopping at the first directory that contains `.git`.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE_NAME, Config};
use crate::error::{Error, Result};

/// Find acmatch.toml at or above `start_dir`, without leaving the git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Resolve the config path.
///
/// An explicit path (`-C`/`--config` or `ACMATCH_CONFIG`) must exist;
/// otherwise discovery runs from `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(cwd));
    };
    if !path.is_file() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(Some(path.to_path_buf()))
}

/// Resolve and load the effective config, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match resolve_config(explicit, cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(&path)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
