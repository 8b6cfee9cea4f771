// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Arena-backed prefix tree.
//!
//! Nodes live in a `Vec` and refer to each other by [`StateId`]. Child edges
//! are ownership-free indices, so failure links added later can point back
//! into the arena without forming reference cycles.

use std::collections::BTreeMap;

use super::StateId;
use crate::error::{Error, Result};

/// A trie node, later an automaton state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// Distance from the root.
    pub depth: u32,
    /// Outgoing trie edges keyed by symbol code.
    pub children: BTreeMap<u32, StateId>,
    /// Failure link. Root until failure links are computed.
    pub fail: StateId,
    /// Pattern indices reported at this state, shortest pattern first.
    pub output: Vec<u32>,
}

impl Node {
    fn new(depth: u32) -> Self {
        Self {
            depth,
            children: BTreeMap::new(),
            fail: StateId::ROOT,
            output: Vec::new(),
        }
    }
}

/// Prefix tree under construction.
#[derive(Debug, Clone)]
pub(crate) struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create a trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
        }
    }

    /// Insert a pattern, recording `pattern` in its terminal node's output.
    ///
    /// Returns the terminal state. Identical patterns share a terminal and
    /// accumulate indices there in insertion order.
    pub fn insert(&mut self, symbols: &[u32], pattern: u32) -> Result<StateId> {
        if symbols.is_empty() {
            return Err(Error::InvalidPattern {
                index: pattern as usize,
            });
        }

        let mut state = StateId::ROOT;
        for &symbol in symbols {
            state = match self.nodes[state.index()].children.get(&symbol) {
                Some(&next) => next,
                None => self.push_child(state, symbol)?,
            };
        }
        self.nodes[state.index()].output.push(pattern);
        Ok(state)
    }

    fn push_child(&mut self, parent: StateId, symbol: u32) -> Result<StateId> {
        let id = StateId::from_index(self.nodes.len())?;
        let depth = self.nodes[parent.index()].depth + 1;
        self.nodes.push(Node::new(depth));
        self.nodes[parent.index()].children.insert(symbol, id);
        Ok(id)
    }

    /// Child of `state` on `symbol`, if the trie has that edge.
    pub fn child(&self, state: StateId, symbol: u32) -> Option<StateId> {
        self.nodes[state.index()].children.get(&symbol).copied()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Rebuild a trie from an already linked node table.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
#[path = "trie_tests.rs"]
mod tests;
