// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanning text against a built automaton.
//!
//! Both scanners hold only a state index and a position; the automaton itself
//! is shared read-only.

use super::alphabet::Alphabet;
use super::{Automaton, Match, StateId};

/// Lazy iterator over the matches in a sequence of symbols.
///
/// Reads one symbol at a time and only as far as the consumer pulls, so
/// dropping it early leaves the rest of the input unread.
#[derive(Clone)]
pub struct Matches<'a, A: Alphabet, I> {
    automaton: &'a Automaton<A>,
    symbols: I,
    state: StateId,
    consumed: usize,
    pending: Vec<u32>,
    cursor: usize,
}

impl<'a, A, I> Matches<'a, A, I>
where
    A: Alphabet,
    I: Iterator<Item = A::Symbol>,
{
    pub(crate) fn new(automaton: &'a Automaton<A>, symbols: I) -> Self {
        Self {
            automaton,
            symbols,
            state: StateId::ROOT,
            consumed: 0,
            pending: Vec::new(),
            cursor: 0,
        }
    }

    /// Number of symbols read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Current automaton state.
    pub fn state(&self) -> StateId {
        self.state
    }
}

impl<'a, A, I> Iterator for Matches<'a, A, I>
where
    A: Alphabet,
    I: Iterator<Item = A::Symbol>,
{
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Match<'a>> {
        loop {
            if let Some(&pattern) = self.pending.get(self.cursor) {
                self.cursor += 1;
                return Some(self.automaton.make_match(pattern, self.consumed));
            }

            let symbol = self.symbols.next()?;
            self.state = self.automaton.next_state(self.state, symbol);
            self.consumed += 1;
            self.pending.clear();
            self.cursor = 0;
            self.automaton.collect_outputs(self.state, &mut self.pending);
        }
    }
}

/// Chunked scanner for input that does not fit in memory at once.
///
/// State carries across [`feed`](Self::feed) calls, so an occurrence split
/// between two chunks is reported by the call that completes it, with
/// positions counted from the start of the whole input.
#[derive(Debug, Clone)]
pub struct Stream<'a, A: Alphabet> {
    automaton: &'a Automaton<A>,
    state: StateId,
    position: usize,
    pending: Vec<u32>,
}

impl<'a, A: Alphabet> Stream<'a, A> {
    pub(crate) fn new(automaton: &'a Automaton<A>) -> Self {
        Self {
            automaton,
            state: StateId::ROOT,
            position: 0,
            pending: Vec::new(),
        }
    }

    /// Scan the next chunk, returning the matches that end inside it.
    pub fn feed(&mut self, chunk: &A::Text) -> Vec<Match<'a>> {
        self.feed_symbols(A::symbols(chunk))
    }

    /// Scan the next chunk of symbols.
    pub fn feed_symbols<I>(&mut self, symbols: I) -> Vec<Match<'a>>
    where
        I: IntoIterator<Item = A::Symbol>,
    {
        let mut found = Vec::new();
        self.feed_with(symbols, |m| found.push(m));
        found
    }

    /// Scan the next chunk of symbols, handing each match to `sink`.
    pub fn feed_with<I, F>(&mut self, symbols: I, mut sink: F)
    where
        I: IntoIterator<Item = A::Symbol>,
        F: FnMut(Match<'a>),
    {
        let automaton = self.automaton;
        for symbol in symbols {
            self.state = automaton.next_state(self.state, symbol);
            self.position += 1;
            self.pending.clear();
            automaton.collect_outputs(self.state, &mut self.pending);
            for &pattern in &self.pending {
                sink(automaton.make_match(pattern, self.position));
            }
        }
    }

    /// Finish the input. Always empty: every match is reported by the chunk
    /// that completes it.
    pub fn flush(&mut self) -> Vec<Match<'a>> {
        Vec::new()
    }

    /// Start over as if no input had been fed.
    pub fn reset(&mut self) {
        self.state = StateId::ROOT;
        self.position = 0;
    }

    /// Symbols fed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current automaton state.
    pub fn state(&self) -> StateId {
        self.state
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
