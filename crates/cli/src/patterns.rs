// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern files.
//!
//! One pattern per line. A tab splits the pattern from an optional payload.
//! Blank lines are skipped; a pattern's id is its 1-based line number.

use std::path::Path;

use crate::automaton::{AlphabetKind, Automaton, Bytes, OutputMode, PatternId, Unicode};
use crate::error::{Error, Result};
use crate::persist::AnyAutomaton;

/// One parsed pattern line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// Line number the pattern was read from.
    pub id: PatternId,
    /// Raw pattern bytes.
    pub pattern: Vec<u8>,
    pub payload: Option<String>,
}

/// Patterns read from a file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

impl PatternSet {
    /// Parse pattern file content.
    pub fn parse(content: &[u8]) -> Self {
        let entries = content
            .split(|&b| b == b'\n')
            .enumerate()
            .filter_map(|(index, line)| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                if line.is_empty() {
                    return None;
                }
                let (pattern, payload) = match line.iter().position(|&b| b == b'\t') {
                    Some(tab) => (
                        &line[..tab],
                        Some(String::from_utf8_lossy(&line[tab + 1..]).into_owned()),
                    ),
                    None => (line, None),
                };
                Some(PatternEntry {
                    id: index as PatternId + 1,
                    pattern: pattern.to_vec(),
                    payload,
                })
            })
            .collect();
        Self { entries }
    }

    /// Read and parse a pattern file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let set = Self::parse(&content);
        tracing::debug!(patterns = set.len(), "read patterns from {}", path.display());
        Ok(set)
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an automaton over `alphabet`.
    ///
    /// Unicode automata need every pattern to be valid UTF-8.
    pub fn compile(&self, alphabet: AlphabetKind, mode: OutputMode) -> Result<AnyAutomaton> {
        match alphabet {
            AlphabetKind::Unicode => {
                let mut builder = Automaton::<Unicode>::builder().output_mode(mode);
                for entry in &self.entries {
                    let pattern = std::str::from_utf8(&entry.pattern).map_err(|_| {
                        Error::Argument(format!(
                            "pattern on line {} is not valid UTF-8 (use --bytes)",
                            entry.id
                        ))
                    })?;
                    add_entry(&mut builder, pattern, entry)?;
                }
                Ok(builder.build()?.into())
            }
            AlphabetKind::Bytes => {
                let mut builder = Automaton::<Bytes>::builder().output_mode(mode);
                for entry in &self.entries {
                    add_entry(&mut builder, entry.pattern.as_slice(), entry)?;
                }
                Ok(builder.build()?.into())
            }
        }
    }
}

fn add_entry<A: crate::automaton::Alphabet>(
    builder: &mut crate::automaton::Builder<A>,
    pattern: &A::Text,
    entry: &PatternEntry,
) -> Result<()> {
    let added = match &entry.payload {
        Some(payload) => builder.add_with_payload(pattern, entry.id, payload.as_str()),
        None => builder.add(pattern, entry.id),
    };
    match added {
        Ok(_) => Ok(()),
        Err(Error::InvalidPattern { .. }) => Err(Error::InvalidPatternLine { line: entry.id }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;
