// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chunked input scanning.
//!
//! Inputs are read in fixed-size chunks and fed to a [`Stream`], so memory
//! use is bounded by the chunk size whatever the input length. Matches that
//! straddle a chunk boundary are reported once, with whole-input positions.
//!
//! For the Unicode alphabet, bytes are decoded as UTF-8. A multi-byte
//! sequence split across chunks is carried into the next chunk; each invalid
//! sequence becomes one U+FFFD symbol.
//!
//! [`Stream`]: crate::automaton::Stream

use std::fs::File;
use std::io::{self, Read};
use std::ops::ControlFlow;
use std::path::Path;

use crate::automaton::{Automaton, Bytes, Match, Stream, Unicode};
use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{Error, Result};
use crate::persist::AnyAutomaton;

/// Totals from scanning one input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Bytes read.
    pub bytes: u64,
    /// Matches handed to the sink.
    pub matches: usize,
    /// The sink asked to stop before the input ended.
    pub stopped: bool,
}

impl ScanSummary {
    fn emit<F>(&mut self, sink: &mut F, m: Match<'_>)
    where
        F: FnMut(Match<'_>) -> ControlFlow<()>,
    {
        if self.stopped {
            return;
        }
        self.matches += 1;
        if sink(m).is_break() {
            self.stopped = true;
        }
    }
}

/// Reads inputs in chunks of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct ChunkReader {
    chunk_size: usize,
}

impl Default for ChunkReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkReader {
    /// Create a reader. A zero chunk size is treated as one byte.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Scan the file at `path`.
    pub fn scan_path<F>(&self, automaton: &AnyAutomaton, path: &Path, sink: F) -> Result<ScanSummary>
    where
        F: FnMut(Match<'_>) -> ControlFlow<()>,
    {
        let io_error = |e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        };
        let file = File::open(path).map_err(io_error)?;
        self.scan(automaton, file, sink).map_err(io_error)
    }

    /// Scan everything `reader` yields, handing matches to `sink` in order.
    ///
    /// Stops early once `sink` returns [`ControlFlow::Break`].
    pub fn scan<R, F>(&self, automaton: &AnyAutomaton, reader: R, sink: F) -> io::Result<ScanSummary>
    where
        R: Read,
        F: FnMut(Match<'_>) -> ControlFlow<()>,
    {
        match automaton {
            AnyAutomaton::Unicode(ac) => self.scan_unicode(ac, reader, sink),
            AnyAutomaton::Bytes(ac) => self.scan_bytes(ac, reader, sink),
        }
    }

    fn scan_bytes<R, F>(&self, ac: &Automaton<Bytes>, mut reader: R, mut sink: F) -> io::Result<ScanSummary>
    where
        R: Read,
        F: FnMut(Match<'_>) -> ControlFlow<()>,
    {
        let mut stream = ac.stream();
        let mut buf = vec![0u8; self.chunk_size];
        let mut summary = ScanSummary::default();

        while !summary.stopped {
            let n = read_chunk(&mut reader, &mut buf)?;
            if n == 0 {
                break;
            }
            summary.bytes += n as u64;
            stream.feed_with(buf[..n].iter().copied(), |m| summary.emit(&mut sink, m));
        }
        Ok(summary)
    }

    fn scan_unicode<R, F>(&self, ac: &Automaton<Unicode>, mut reader: R, mut sink: F) -> io::Result<ScanSummary>
    where
        R: Read,
        F: FnMut(Match<'_>) -> ControlFlow<()>,
    {
        let mut stream = ac.stream();
        let mut buf = vec![0u8; self.chunk_size];
        let mut carry: Vec<u8> = Vec::new();
        let mut summary = ScanSummary::default();

        while !summary.stopped {
            let n = read_chunk(&mut reader, &mut buf)?;
            if n == 0 {
                break;
            }
            summary.bytes += n as u64;
            carry.extend_from_slice(&buf[..n]);
            let consumed = feed_utf8(&mut stream, &carry, |m| summary.emit(&mut sink, m));
            carry.drain(..consumed);
        }

        // Truncated sequence at end of input.
        if !carry.is_empty() && !summary.stopped {
            stream.feed_with(std::iter::once(char::REPLACEMENT_CHARACTER), |m| {
                summary.emit(&mut sink, m)
            });
        }
        Ok(summary)
    }
}

/// Feed the decodable prefix of `bytes`, returning how many bytes were used.
///
/// An incomplete sequence at the end is left for the next chunk.
fn feed_utf8<'a, F>(stream: &mut Stream<'a, Unicode>, bytes: &[u8], mut sink: F) -> usize
where
    F: FnMut(Match<'a>),
{
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                stream.feed_with(text.chars(), &mut sink);
                return bytes.len();
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                stream.feed_with(String::from_utf8_lossy(valid).chars(), &mut sink);
                match e.error_len() {
                    Some(len) => {
                        stream.feed_with(std::iter::once(char::REPLACEMENT_CHARACTER), &mut sink);
                        rest = &after[len..];
                    }
                    None => return bytes.len() - after.len(),
                }
            }
        }
    }
}

fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
