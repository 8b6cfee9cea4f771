// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled automaton persistence.
//!
//! An automaton is stored as a postcard-encoded header plus a flat node table
//! of `(node_id, children, failure_link, output)` records. Loading checks
//! every structural invariant before rebuilding the transition table, so a
//! loaded automaton is indistinguishable from a freshly built one.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::failure::{Links, dictionary_links};
use crate::automaton::trie::{Node, Trie};
use crate::automaton::{
    Alphabet, AlphabetKind, Automaton, Bytes, OutputMode, PatternInfo, StateId, Stats, Unicode,
};
use crate::error::{Error, Result};

/// Format version for invalidation on layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// One state of a persisted automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Arena index; must equal the record's position.
    pub node_id: u32,
    /// Trie edges as `(symbol, child)` pairs in ascending symbol order.
    pub children: Vec<(u32, u32)>,
    pub failure_link: u32,
    /// Pattern indices reported at this state.
    pub output: Vec<u32>,
}

/// Persisted automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonFile {
    /// Format version.
    pub version: u32,
    /// acmatch version that wrote the file.
    pub acmatch_version: String,
    pub alphabet: AlphabetKind,
    pub output_mode: OutputMode,
    pub patterns: Vec<PatternInfo>,
    pub nodes: Vec<NodeRecord>,
}

impl<A: Alphabet> Automaton<A> {
    /// Flatten into a node table.
    pub fn to_table(&self) -> AutomatonFile {
        let nodes = self
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| NodeRecord {
                node_id: index as u32,
                children: node
                    .children
                    .iter()
                    .map(|(&symbol, child)| (symbol, child.index() as u32))
                    .collect(),
                failure_link: node.fail.index() as u32,
                output: node.output.clone(),
            })
            .collect();

        AutomatonFile {
            version: FORMAT_VERSION,
            acmatch_version: env!("CARGO_PKG_VERSION").to_string(),
            alphabet: A::KIND,
            output_mode: self.output_mode(),
            patterns: self.patterns().to_vec(),
            nodes,
        }
    }

    /// Rebuild from a node table, validating it first.
    pub fn from_table(file: AutomatonFile) -> Result<Self> {
        if file.version != FORMAT_VERSION {
            return Err(Error::FormatVersion {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }
        if file.alphabet != A::KIND {
            return Err(Error::AlphabetMismatch {
                expected: A::KIND,
                found: file.alphabet,
            });
        }

        let (nodes, order) = validate::<A>(&file)?;
        let links = Links {
            dict: match file.output_mode {
                OutputMode::Eager => Vec::new(),
                OutputMode::Lazy => dictionary_links(&nodes, &order),
            },
            order,
        };

        tracing::debug!(
            states = nodes.len(),
            patterns = file.patterns.len(),
            written_by = %file.acmatch_version,
            "automaton table loaded"
        );
        Ok(Automaton::from_linked(
            Trie::from_nodes(nodes),
            links,
            file.patterns,
            file.output_mode,
        ))
    }

    /// Encode with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(&self.to_table())?)
    }

    /// Decode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let file: AutomatonFile = postcard::from_bytes(bytes)?;
        Self::from_table(file)
    }

    /// Write to disk atomically via a temp file.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_bytes()?)
    }

    /// Read a compiled automaton from disk.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_bytes(&read(path)?)
    }
}

/// A compiled automaton whose alphabet is only known at runtime.
#[derive(Debug, Clone)]
pub enum AnyAutomaton {
    Unicode(Automaton<Unicode>),
    Bytes(Automaton<Bytes>),
}

impl AnyAutomaton {
    /// Decode, dispatching on the stored alphabet.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let file: AutomatonFile = postcard::from_bytes(bytes)?;
        match file.alphabet {
            AlphabetKind::Unicode => Automaton::from_table(file).map(AnyAutomaton::Unicode),
            AlphabetKind::Bytes => Automaton::from_table(file).map(AnyAutomaton::Bytes),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_bytes(&read(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        match self {
            AnyAutomaton::Unicode(ac) => ac.save(path),
            AnyAutomaton::Bytes(ac) => ac.save(path),
        }
    }

    pub fn alphabet(&self) -> AlphabetKind {
        match self {
            AnyAutomaton::Unicode(_) => AlphabetKind::Unicode,
            AnyAutomaton::Bytes(_) => AlphabetKind::Bytes,
        }
    }

    pub fn stats(&self) -> Stats {
        match self {
            AnyAutomaton::Unicode(ac) => ac.stats(),
            AnyAutomaton::Bytes(ac) => ac.stats(),
        }
    }
}

impl From<Automaton<Unicode>> for AnyAutomaton {
    fn from(ac: Automaton<Unicode>) -> Self {
        AnyAutomaton::Unicode(ac)
    }
}

impl From<Automaton<Bytes>> for AnyAutomaton {
    fn from(ac: Automaton<Bytes>) -> Self {
        AnyAutomaton::Bytes(ac)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, bytes).map_err(io_err)?;
    std::fs::rename(&temp_path, path).map_err(io_err)?;
    Ok(())
}

fn corrupt(message: impl Into<String>) -> Error {
    Error::Corrupt(message.into())
}

/// Check the table's invariants and convert it to arena nodes.
///
/// Returns the nodes and their breadth-first order.
fn validate<A: Alphabet>(file: &AutomatonFile) -> Result<(Vec<Node>, Vec<StateId>)> {
    let records = &file.nodes;
    let count = records.len();
    if count == 0 {
        return Err(corrupt("node table is empty"));
    }
    if u32::try_from(file.patterns.len()).is_err() {
        return Err(corrupt("pattern table too large"));
    }
    if let Some(index) = file.patterns.iter().position(|p| p.len == 0) {
        return Err(corrupt(format!("pattern {index} is empty")));
    }
    for (index, record) in records.iter().enumerate() {
        if record.node_id as usize != index {
            return Err(corrupt(format!(
                "node {index} is stored with id {}",
                record.node_id
            )));
        }
    }

    // Children must form a tree rooted at 0 that reaches every node.
    let mut depth: Vec<Option<u32>> = vec![None; count];
    depth[0] = Some(0);
    let mut order = Vec::with_capacity(count);
    let mut queue = VecDeque::from([0usize]);
    while let Some(index) = queue.pop_front() {
        order.push(StateId::from_index(index)?);
        let parent_depth = depth[index].unwrap_or_default();
        let mut previous: Option<u32> = None;
        for &(symbol, child) in &records[index].children {
            if previous.is_some_and(|p| p >= symbol) {
                return Err(corrupt(format!("node {index} has unordered edges")));
            }
            previous = Some(symbol);
            if !is_symbol::<A>(symbol) {
                return Err(corrupt(format!(
                    "node {index} has edge on invalid {} symbol {symbol:#x}",
                    A::KIND
                )));
            }
            let child = child as usize;
            let Some(slot) = depth.get_mut(child) else {
                return Err(corrupt(format!("edge to missing node {child}")));
            };
            if child == 0 || slot.is_some() {
                return Err(corrupt(format!("node {child} has more than one parent")));
            }
            *slot = Some(parent_depth + 1);
            queue.push_back(child);
        }
    }
    if order.len() != count {
        return Err(corrupt(format!(
            "{} nodes unreachable from root",
            count - order.len()
        )));
    }

    let depth: Vec<u32> = depth.into_iter().map(Option::unwrap_or_default).collect();
    if records[0].failure_link != 0 {
        return Err(corrupt("root must link to itself"));
    }
    for (index, record) in records.iter().enumerate().skip(1) {
        let fail = record.failure_link as usize;
        if fail >= count || depth[fail] >= depth[index] {
            return Err(corrupt(format!(
                "node {index} has failure link {fail} that is not shallower"
            )));
        }
    }

    for (index, record) in records.iter().enumerate() {
        let inherited: &[u32] = match file.output_mode {
            OutputMode::Eager if index != 0 => &records[record.failure_link as usize].output,
            _ => &[],
        };
        if !record.output.starts_with(inherited) {
            return Err(corrupt(format!(
                "node {index} output is not closed over its failure link"
            )));
        }
        for &pattern in &record.output[inherited.len()..] {
            match file.patterns.get(pattern as usize) {
                Some(info) if info.len == depth[index] as usize => {}
                Some(_) => {
                    return Err(corrupt(format!(
                        "node {index} reports pattern {pattern} of the wrong length"
                    )));
                }
                None => return Err(corrupt(format!("node {index} reports missing pattern {pattern}"))),
            }
        }
    }

    let mut nodes = Vec::with_capacity(count);
    for (record, &depth) in records.iter().zip(&depth) {
        let mut children = BTreeMap::new();
        for &(symbol, child) in &record.children {
            children.insert(symbol, StateId::from_index(child as usize)?);
        }
        nodes.push(Node {
            depth,
            children,
            fail: StateId::from_index(record.failure_link as usize)?,
            output: record.output.clone(),
        });
    }

    Ok((nodes, order))
}

fn is_symbol<A: Alphabet>(code: u32) -> bool {
    match A::KIND {
        AlphabetKind::Unicode => char::from_u32(code).is_some(),
        AlphabetKind::Bytes => code <= u32::from(u8::MAX),
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
