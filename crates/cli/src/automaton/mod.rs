// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aho-Corasick automaton.
//!
//! Construction runs as a pipeline over one node arena:
//! - [`trie`]: insert patterns into a prefix tree
//! - [`failure`]: breadth-first failure links and output closure
//! - [`transition`]: fully resolved goto table over the pattern symbols
//!
//! The result is an immutable [`Automaton`] that any number of threads can
//! scan concurrently. Scanning is lazy ([`Matches`]) or chunked ([`Stream`]).
//!
//! ```
//! use acmatch::{Automaton, Unicode};
//!
//! let ac = Automaton::<Unicode>::build([("he", 1), ("she", 2), ("his", 3), ("hers", 4)])?;
//! let found: Vec<_> = ac.search("ahishers").map(|m| (m.start, m.end, m.id)).collect();
//! assert_eq!(found, [(1, 4, 3), (4, 6, 1), (3, 6, 2), (4, 8, 4)]);
//! # Ok::<(), acmatch::Error>(())
//! ```

pub mod alphabet;
mod builder;
pub(crate) mod failure;
mod search;
mod transition;
pub(crate) mod trie;

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub use alphabet::{Alphabet, AlphabetKind, Bytes, Unicode};
pub use builder::Builder;
pub use search::{Matches, Stream};

use crate::error::{Error, Result};
use failure::Links;
use transition::TransitionTable;
use trie::{Node, Trie};

/// Caller-chosen pattern identifier.
pub type PatternId = u64;

/// Index of a state in the automaton's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    /// The root state. Its failure link is itself.
    pub const ROOT: StateId = StateId(0);

    /// Arena index of this state.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Result<Self> {
        u32::try_from(index)
            .map(StateId)
            .map_err(|_| Error::Capacity("state count exceeds u32"))
    }
}

/// How output sets are maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Merge each state's failure-target outputs into its own at build time.
    /// Costs memory, gives O(1) retrieval per visited state.
    #[default]
    Eager,
    /// Keep only each state's own outputs and follow dictionary links while
    /// scanning.
    Lazy,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Eager => f.write_str("eager"),
            OutputMode::Lazy => f.write_str("lazy"),
        }
    }
}

/// A pattern as stored in the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInfo {
    /// Caller-chosen identifier.
    pub id: PatternId,
    /// Length in symbols.
    pub len: usize,
    /// Optional payload reported with every match.
    pub payload: Option<String>,
}

/// One occurrence of a pattern.
///
/// Positions count symbols: chars for [`Unicode`], bytes for [`Bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match<'a> {
    /// Position of the first symbol of the occurrence.
    pub start: usize,
    /// Position one past the last symbol of the occurrence.
    pub end: usize,
    /// Identifier of the matched pattern.
    pub id: PatternId,
    /// Payload of the matched pattern.
    pub payload: Option<&'a str>,
}

impl Match<'_> {
    /// The occurrence as a half-open range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Summary of an automaton's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub alphabet: AlphabetKind,
    pub output_mode: OutputMode,
    pub patterns: usize,
    pub states: usize,
    pub classes: usize,
    /// States whose transitions are a dense table row.
    pub dense_states: usize,
    pub max_depth: usize,
    pub heap_bytes: usize,
}

/// An immutable Aho-Corasick automaton over alphabet `A`.
#[derive(Debug, Clone)]
pub struct Automaton<A: Alphabet = Unicode> {
    nodes: Vec<Node>,
    patterns: Vec<PatternInfo>,
    transitions: TransitionTable,
    dict: Vec<Option<StateId>>,
    mode: OutputMode,
    _alphabet: PhantomData<fn() -> A>,
}

impl<A: Alphabet> Automaton<A> {
    /// Build an automaton from `(pattern, id)` pairs.
    ///
    /// Fails with [`Error::InvalidPattern`] if any pattern is empty; no
    /// automaton is produced in that case.
    pub fn build<I, T>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, PatternId)>,
        T: AsRef<A::Text>,
    {
        let mut builder = Builder::new();
        for (pattern, id) in patterns {
            builder.add(pattern.as_ref(), id)?;
        }
        builder.build()
    }

    /// Build an automaton from `(pattern, id, payload)` triples.
    pub fn build_with_payloads<I, T, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, PatternId, Option<P>)>,
        T: AsRef<A::Text>,
        P: Into<String>,
    {
        let mut builder = Builder::new();
        for (pattern, id, payload) in patterns {
            match payload {
                Some(payload) => builder.add_with_payload(pattern.as_ref(), id, payload)?,
                None => builder.add(pattern.as_ref(), id)?,
            };
        }
        builder.build()
    }

    /// Start an incremental build.
    pub fn builder() -> Builder<A> {
        Builder::new()
    }

    /// Assemble an automaton from a linked trie.
    pub(crate) fn from_linked(
        trie: Trie,
        links: Links,
        patterns: Vec<PatternInfo>,
        mode: OutputMode,
    ) -> Self {
        let transitions = TransitionTable::build(trie.nodes(), &links.order);
        Self {
            nodes: trie.into_nodes(),
            patterns,
            transitions,
            dict: links.dict,
            mode,
            _alphabet: PhantomData,
        }
    }

    /// Lazily scan `text`, yielding matches by ascending end position.
    ///
    /// Matches sharing an end are ordered shortest pattern first, then by
    /// insertion order. Each call starts over from the root.
    pub fn search<'a, 't>(&'a self, text: &'t A::Text) -> Matches<'a, A, A::Symbols<'t>> {
        Matches::new(self, A::symbols(text))
    }

    /// Like [`search`](Self::search), over any sequence of symbols.
    pub fn search_symbols<I>(&self, symbols: I) -> Matches<'_, A, I::IntoIter>
    where
        I: IntoIterator<Item = A::Symbol>,
    {
        Matches::new(self, symbols.into_iter())
    }

    /// Collect every match in `text`.
    pub fn find_all(&self, text: &A::Text) -> Vec<Match<'_>> {
        self.search(text).collect()
    }

    /// Whether any pattern occurs in `text`. Stops reading at the first match.
    pub fn contains_any(&self, text: &A::Text) -> bool {
        self.contains_any_symbols(A::symbols(text))
    }

    /// [`Automaton::contains_any`] over an arbitrary symbol sequence.
    pub fn contains_any_symbols<I>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = A::Symbol>,
    {
        self.search_symbols(symbols).next().is_some()
    }

    /// Start a chunked scan.
    pub fn stream(&self) -> Stream<'_, A> {
        Stream::new(self)
    }

    /// The initial state.
    pub fn start_state(&self) -> StateId {
        StateId::ROOT
    }

    /// The goto function: state reached from `state` on `symbol`.
    ///
    /// `state` must belong to this automaton.
    #[inline]
    pub fn next_state(&self, state: StateId, symbol: A::Symbol) -> StateId {
        self.transitions.next(&self.nodes, state, A::code(symbol))
    }

    /// Failure link of `state`.
    pub fn failure_link(&self, state: StateId) -> StateId {
        self.nodes[state.index()].fail
    }

    /// Depth of `state`, i.e. the length of the prefix it represents.
    pub fn depth(&self, state: StateId) -> usize {
        self.nodes[state.index()].depth as usize
    }

    /// Whether entering `state` reports at least one match.
    pub fn is_match_state(&self, state: StateId) -> bool {
        match self.mode {
            OutputMode::Eager => !self.nodes[state.index()].output.is_empty(),
            OutputMode::Lazy => {
                !self.nodes[state.index()].output.is_empty() || self.dict[state.index()].is_some()
            }
        }
    }

    /// Number of states, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of patterns, duplicates included.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of distinct symbols appearing in patterns.
    pub fn class_count(&self) -> usize {
        self.transitions.class_count()
    }

    /// Patterns in insertion order.
    pub fn patterns(&self) -> &[PatternInfo] {
        &self.patterns
    }

    /// Pattern at insertion index `index`.
    pub fn pattern(&self, index: usize) -> Option<&PatternInfo> {
        self.patterns.get(index)
    }

    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    pub fn alphabet(&self) -> AlphabetKind {
        A::KIND
    }

    /// Approximate heap usage in bytes.
    pub fn heap_bytes(&self) -> usize {
        let nodes: usize = self
            .nodes
            .iter()
            .map(|n| {
                size_of::<Node>()
                    + n.children.len() * (size_of::<u32>() + size_of::<StateId>())
                    + n.output.capacity() * size_of::<u32>()
            })
            .sum();
        let patterns: usize = self
            .patterns
            .iter()
            .map(|p| size_of::<PatternInfo>() + p.payload.as_ref().map_or(0, String::capacity))
            .sum();
        nodes
            + patterns
            + self.transitions.heap_bytes()
            + self.dict.capacity() * size_of::<Option<StateId>>()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            alphabet: A::KIND,
            output_mode: self.mode,
            patterns: self.patterns.len(),
            states: self.nodes.len(),
            classes: self.class_count(),
            dense_states: self.transitions.dense_states(),
            max_depth: self.nodes.iter().map(|n| n.depth as usize).max().unwrap_or(0),
            heap_bytes: self.heap_bytes(),
        }
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Append the pattern indices reported at `state`, shortest first.
    #[inline]
    pub(crate) fn collect_outputs(&self, state: StateId, out: &mut Vec<u32>) {
        match self.mode {
            OutputMode::Eager => out.extend_from_slice(&self.nodes[state.index()].output),
            OutputMode::Lazy => {
                // Walk longest to shortest with each group reversed, then
                // flip the whole run.
                let start = out.len();
                let mut link = Some(state);
                while let Some(current) = link {
                    out.extend(self.nodes[current.index()].output.iter().rev());
                    link = self.dict[current.index()];
                }
                out[start..].reverse();
            }
        }
    }

    #[inline]
    pub(crate) fn make_match(&self, pattern: u32, end: usize) -> Match<'_> {
        let info = &self.patterns[pattern as usize];
        Match {
            start: end - info.len,
            end,
            id: info.id,
            payload: info.payload.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
