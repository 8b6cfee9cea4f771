// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Failure links and output closure.
//!
//! Processes the trie breadth-first with an explicit queue. A node's failure
//! link depends on its parent's, and its merged output depends on the output
//! of its failure target, which is always shallower and therefore dequeued
//! first.

use std::collections::VecDeque;

use super::trie::{Node, Trie};
use super::{OutputMode, StateId};

/// Facts about a linked trie needed by later construction phases.
#[derive(Debug, Clone, Default)]
pub(crate) struct Links {
    /// States in breadth-first order, root first.
    pub order: Vec<StateId>,
    /// Dictionary links: nearest proper failure ancestor with outputs of its
    /// own. Only populated in lazy output mode.
    pub dict: Vec<Option<StateId>>,
}

/// Compute failure links for every node, then close or link outputs.
pub(crate) fn link(trie: &mut Trie, mode: OutputMode) -> Links {
    let nodes = trie.nodes_mut();
    let mut order = Vec::with_capacity(nodes.len());
    let mut queue = VecDeque::new();
    let mut edges: Vec<(u32, StateId)> = Vec::new();

    nodes[StateId::ROOT.index()].fail = StateId::ROOT;
    order.push(StateId::ROOT);
    let root_children: Vec<StateId> = nodes[StateId::ROOT.index()]
        .children
        .values()
        .copied()
        .collect();
    for child in root_children {
        nodes[child.index()].fail = StateId::ROOT;
        queue.push_back(child);
    }

    while let Some(parent) = queue.pop_front() {
        order.push(parent);
        let fail = nodes[parent.index()].fail;

        if mode == OutputMode::Eager && !nodes[fail.index()].output.is_empty() {
            let mut merged = nodes[fail.index()].output.clone();
            merged.append(&mut nodes[parent.index()].output);
            nodes[parent.index()].output = merged;
        }

        edges.clear();
        edges.extend(
            nodes[parent.index()]
                .children
                .iter()
                .map(|(&symbol, &child)| (symbol, child)),
        );
        for &(symbol, child) in &edges {
            let mut candidate = fail;
            let target = loop {
                if let Some(&next) = nodes[candidate.index()].children.get(&symbol) {
                    break next;
                }
                if candidate == StateId::ROOT {
                    break StateId::ROOT;
                }
                candidate = nodes[candidate.index()].fail;
            };
            nodes[child.index()].fail = target;
            queue.push_back(child);
        }
    }

    let dict = match mode {
        OutputMode::Eager => Vec::new(),
        OutputMode::Lazy => dictionary_links(nodes, &order),
    };

    tracing::trace!(states = order.len(), ?mode, "failure links computed");
    Links { order, dict }
}

/// Dictionary links for unmerged outputs.
///
/// `order` must be breadth-first so each failure target is resolved before
/// the states that point at it.
pub(crate) fn dictionary_links(nodes: &[Node], order: &[StateId]) -> Vec<Option<StateId>> {
    let mut dict = vec![None; nodes.len()];
    for &state in order.iter().skip(1) {
        let fail = nodes[state.index()].fail;
        dict[state.index()] = if fail != StateId::ROOT && !nodes[fail.index()].output.is_empty() {
            Some(fail)
        } else {
            dict[fail.index()]
        };
    }
    dict
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
