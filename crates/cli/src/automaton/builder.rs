// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental automaton construction.

use std::marker::PhantomData;

use super::alphabet::{self, Alphabet, Unicode};
use super::trie::Trie;
use super::{Automaton, OutputMode, PatternId, PatternInfo, failure};
use crate::error::{Error, Result};

/// Collects patterns, then links them into an [`Automaton`].
///
/// A builder produces exactly one automaton. Once [`build`](Self::build) has
/// run the builder is sealed and rejects further patterns with
/// [`Error::ImmutableAutomaton`].
#[derive(Debug)]
pub struct Builder<A: Alphabet = Unicode> {
    trie: Trie,
    patterns: Vec<PatternInfo>,
    mode: OutputMode,
    sealed: bool,
    _alphabet: PhantomData<fn() -> A>,
}

impl<A: Alphabet> Default for Builder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Alphabet> Builder<A> {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            patterns: Vec::new(),
            mode: OutputMode::default(),
            sealed: false,
            _alphabet: PhantomData,
        }
    }

    /// Choose how output sets are maintained (default: eager).
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a pattern.
    pub fn add(&mut self, pattern: &A::Text, id: PatternId) -> Result<&mut Self> {
        self.insert(alphabet::encode::<A>(pattern), id, None)
    }

    /// Add a pattern with a payload reported alongside its matches.
    pub fn add_with_payload(
        &mut self,
        pattern: &A::Text,
        id: PatternId,
        payload: impl Into<String>,
    ) -> Result<&mut Self> {
        self.insert(alphabet::encode::<A>(pattern), id, Some(payload.into()))
    }

    fn insert(
        &mut self,
        symbols: Vec<u32>,
        id: PatternId,
        payload: Option<String>,
    ) -> Result<&mut Self> {
        if self.sealed {
            return Err(Error::ImmutableAutomaton);
        }
        let index = u32::try_from(self.patterns.len())
            .map_err(|_| Error::Capacity("pattern count exceeds u32"))?;
        self.trie.insert(&symbols, index)?;
        self.patterns.push(PatternInfo {
            id,
            len: symbols.len(),
            payload,
        });
        Ok(self)
    }

    /// Number of patterns added so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether [`build`](Self::build) has already run.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Compute failure links and transitions, and hand over the automaton.
    pub fn build(&mut self) -> Result<Automaton<A>> {
        if self.sealed {
            return Err(Error::ImmutableAutomaton);
        }
        self.sealed = true;

        let mut trie = std::mem::take(&mut self.trie);
        let patterns = std::mem::take(&mut self.patterns);
        let links = failure::link(&mut trie, self.mode);
        let automaton = Automaton::from_linked(trie, links, patterns, self.mode);

        tracing::debug!(
            alphabet = %A::KIND,
            mode = ?self.mode,
            patterns = automaton.pattern_count(),
            states = automaton.node_count(),
            classes = automaton.class_count(),
            "automaton built"
        );
        Ok(automaton)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
