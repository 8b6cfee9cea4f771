// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan result rendering.
//!
//! Text format, one line per match:
//! ```text
//! <path>:<start>:<end>:<id>[:<payload>]
//! ```
//! With `--count`, one `<path>:<count>` line per input. JSON is buffered and
//! written at the end as one array of per-input objects.

use std::io::Write;

use serde::Serialize;

use crate::automaton::{Match, PatternId};

/// Name used for standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// A match detached from the automaton it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundMatch {
    pub start: usize,
    pub end: usize,
    pub id: PatternId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl From<Match<'_>> for FoundMatch {
    fn from(m: Match<'_>) -> Self {
        Self {
            start: m.start,
            end: m.end,
            id: m.id,
            payload: m.payload.map(str::to_string),
        }
    }
}

/// Results for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileMatches {
    pub path: String,
    pub count: usize,
    /// Empty in count-only mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<FoundMatch>,
}

/// Text output formatter.
pub struct TextFormatter<W> {
    out: W,
    count_only: bool,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(out: W, count_only: bool) -> Self {
        Self { out, count_only }
    }

    /// Write one input's results.
    pub fn write_file(&mut self, file: &FileMatches) -> std::io::Result<()> {
        if self.count_only {
            return writeln!(self.out, "{}:{}", file.path, file.count);
        }
        for m in &file.matches {
            write!(self.out, "{}:{}:{}:{}", file.path, m.start, m.end, m.id)?;
            if let Some(payload) = &m.payload {
                write!(self.out, ":{}", payload)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write all results as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut out: W, files: &[FileMatches]) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut out, files).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
