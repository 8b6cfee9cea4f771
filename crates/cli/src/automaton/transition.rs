// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The goto function as a transition table.
//!
//! Every symbol that labels some trie edge gets a dense class index. Symbols
//! without a class label no edge anywhere, so every state moves to the root
//! on them.
//!
//! Classified symbols are resolved through dense rows for a breadth-first
//! prefix of the states, root included, filled so that the row of a state's
//! failure target is always complete before it is copied. The number of
//! dense cells is bounded by the trie size, so wide alphabets do not blow up
//! memory. States past that prefix follow their own trie edges and then
//! their failure links until they reach a state with a dense row.

use std::collections::{BTreeSet, HashMap};

use super::StateId;
use super::trie::Node;

/// Marker for "no class" in the dense lookup table.
const NO_CLASS: u32 = u32::MAX;

/// Symbols below this code are classified through a flat table.
const DENSE_LIMIT: usize = 256;

/// Maps symbol codes to dense column indices.
#[derive(Debug, Clone)]
pub(crate) struct SymbolClasses {
    dense: Vec<u32>,
    sparse: HashMap<u32, u32>,
    count: usize,
}

impl SymbolClasses {
    /// Assign classes to every edge symbol, in ascending symbol order.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let symbols: BTreeSet<u32> = nodes
            .iter()
            .flat_map(|node| node.children.keys().copied())
            .collect();

        let mut dense = vec![NO_CLASS; DENSE_LIMIT];
        let mut sparse = HashMap::new();
        for (class, symbol) in symbols.iter().enumerate() {
            let class = class as u32;
            match dense.get_mut(*symbol as usize) {
                Some(slot) => *slot = class,
                None => {
                    sparse.insert(*symbol, class);
                }
            }
        }

        Self {
            dense,
            sparse,
            count: symbols.len(),
        }
    }

    /// Class of a symbol code, if the symbol labels any edge.
    #[inline]
    pub fn get(&self, code: u32) -> Option<u32> {
        match self.dense.get(code as usize) {
            Some(&NO_CLASS) => None,
            Some(&class) => Some(class),
            None => self.sparse.get(&code).copied(),
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.count
    }

    fn heap_bytes(&self) -> usize {
        self.dense.len() * size_of::<u32>()
            + self.sparse.capacity() * (2 * size_of::<u32>() + size_of::<u64>())
    }
}

/// Marker for "no dense row" in the row index.
const NO_ROW: u32 = u32::MAX;

/// Tables up to this many cells are always fully dense.
const MIN_DENSE_CELLS: usize = 1 << 16;

/// Dense cells allowed per state beyond the minimum.
const DENSE_CELLS_PER_STATE: usize = 8;

/// Transition function over all states.
#[derive(Debug, Clone)]
pub(crate) struct TransitionTable {
    classes: SymbolClasses,
    /// Dense row of each state, or `NO_ROW`.
    rows: Vec<u32>,
    table: Vec<StateId>,
    stride: usize,
    dense_states: usize,
}

impl TransitionTable {
    /// Resolve `goto(state, class)` for the dense prefix of the states.
    ///
    /// `order` must list states breadth-first, root first, and failure links
    /// must already be set.
    pub fn build(nodes: &[Node], order: &[StateId]) -> Self {
        let budget = MIN_DENSE_CELLS.max(DENSE_CELLS_PER_STATE * nodes.len());
        Self::with_budget(nodes, order, budget)
    }

    /// Like [`build`](Self::build), with at most `budget` dense cells.
    /// The root always gets a row.
    pub fn with_budget(nodes: &[Node], order: &[StateId], budget: usize) -> Self {
        let classes = SymbolClasses::from_nodes(nodes);
        let stride = classes.len();
        let dense_states = match stride {
            0 => order.len(),
            _ => (budget / stride).clamp(1, order.len().max(1)),
        };

        let mut rows = vec![NO_ROW; nodes.len()];
        let mut table = vec![StateId::ROOT; dense_states * stride];

        for (row, &state) in order[..dense_states].iter().enumerate() {
            let node = &nodes[state.index()];
            rows[state.index()] = row as u32;
            let start = row * stride;
            if state != StateId::ROOT {
                // Failure targets are shallower, so they come earlier in
                // breadth-first order and already have a row.
                let fail_start = rows[node.fail.index()] as usize * stride;
                table.copy_within(fail_start..fail_start + stride, start);
            }
            for (&symbol, &child) in &node.children {
                if let Some(class) = classes.get(symbol) {
                    table[start + class as usize] = child;
                }
            }
        }

        tracing::trace!(
            states = nodes.len(),
            dense_states,
            classes = stride,
            "transition table filled"
        );
        Self {
            classes,
            rows,
            table,
            stride,
            dense_states,
        }
    }

    /// Next state after reading `code` in `state`.
    #[inline]
    pub fn next(&self, nodes: &[Node], state: StateId, code: u32) -> StateId {
        let Some(class) = self.classes.get(code) else {
            return StateId::ROOT;
        };
        let mut current = state;
        loop {
            let row = self.rows[current.index()];
            if row != NO_ROW {
                return self.table[row as usize * self.stride + class as usize];
            }
            let node = &nodes[current.index()];
            if let Some(&child) = node.children.get(&code) {
                return child;
            }
            current = node.fail;
        }
    }

    /// Number of symbol classes (table width).
    pub fn class_count(&self) -> usize {
        self.stride
    }

    /// Number of states with a dense row.
    pub fn dense_states(&self) -> usize {
        self.dense_states
    }

    pub fn heap_bytes(&self) -> usize {
        self.table.capacity() * size_of::<StateId>()
            + self.rows.capacity() * size_of::<u32>()
            + self.classes.heap_bytes()
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
