// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles acmatch.toml parsing with version validation and unknown key warnings.

use std::path::Path;

use serde::Deserialize;

use crate::automaton::{AlphabetKind, OutputMode};
use crate::error::{Error, Result};

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "acmatch.toml";

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default read size for chunked scanning (64KB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Known top-level and section keys, for unknown key warnings.
const KNOWN_KEYS: &[&str] = &["version", "automaton", "scan"];
const AUTOMATON_KEYS: &[&str] = &["alphabet", "output"];
const SCAN_KEYS: &[&str] = &["chunk_size", "hidden", "git_ignore"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Automaton construction settings.
    #[serde(default)]
    pub automaton: AutomatonConfig,

    /// Scan settings.
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            automaton: AutomatonConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// Automaton construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct AutomatonConfig {
    /// Symbol alphabet (default: "unicode").
    #[serde(default)]
    pub alphabet: AlphabetKind,

    /// Output set maintenance (default: "eager").
    #[serde(default)]
    pub output: OutputMode,
}

/// Scan settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanConfig {
    /// Bytes read per chunk.
    #[serde(default = "ScanConfig::default_chunk_size")]
    pub chunk_size: usize,

    /// Scan hidden files when walking directories.
    #[serde(default)]
    pub hidden: bool,

    /// Respect .gitignore when walking directories.
    #[serde(default = "ScanConfig::default_git_ignore")]
    pub git_ignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::default_chunk_size(),
            hidden: false,
            git_ignore: Self::default_git_ignore(),
        }
    }
}

impl ScanConfig {
    pub(crate) fn default_chunk_size() -> usize {
        DEFAULT_CHUNK_SIZE
    }

    pub(crate) fn default_git_ignore() -> bool {
        true
    }
}

/// Load config, warning about unrecognized keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_err = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_err(e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_err("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_err(format!(
            "unsupported config version {} (supported: {})\n  Upgrade acmatch to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    let config: Config = toml::from_str(content).map_err(|e| config_err(e.to_string()))?;
    if config.scan.chunk_size == 0 {
        return Err(config_err("scan.chunk_size must be greater than 0".to_string()));
    }
    Ok(config)
}

/// Parse config, warning on stderr about unrecognized keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let config = parse(content, path)?;
    for key in unknown_keys(content) {
        warn_unknown_key(path, &key);
    }
    Ok(config)
}

/// Dotted paths of keys acmatch does not recognize.
pub(crate) fn unknown_keys(content: &str) -> Vec<String> {
    let Ok(table) = content.parse::<toml::Table>() else {
        return Vec::new();
    };

    let mut unknown = Vec::new();
    for (key, value) in &table {
        let known_section = match key.as_str() {
            "automaton" => AUTOMATON_KEYS,
            "scan" => SCAN_KEYS,
            k if KNOWN_KEYS.contains(&k) => continue,
            _ => {
                unknown.push(key.clone());
                continue;
            }
        };
        if let toml::Value::Table(section) = value {
            unknown.extend(
                section
                    .keys()
                    .filter(|k| !known_section.contains(&k.as_str()))
                    .map(|k| format!("{key}.{k}")),
            );
        }
    }
    unknown
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "acmatch: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
