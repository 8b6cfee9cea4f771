// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::automaton::{Builder, PatternId};
use tempfile::tempdir;

fn triples<A: Alphabet>(ac: &Automaton<A>, text: &A::Text) -> Vec<(usize, usize, PatternId)> {
    ac.search(text).map(|m| (m.start, m.end, m.id)).collect()
}

fn classic() -> Automaton<Unicode> {
    Automaton::build_with_payloads([
        ("he", 1, Some("pronoun")),
        ("she", 2, None),
        ("his", 3, None),
        ("hers", 4, Some("possessive")),
    ])
    .unwrap()
}

fn corrupt_message(result: Result<Automaton<Unicode>>) -> String {
    match result {
        Err(Error::Corrupt(message)) => message,
        Err(other) => panic!("expected corrupt error, got {other}"),
        Ok(_) => panic!("expected corrupt error, table was accepted"),
    }
}

#[test]
fn table_records_every_node() {
    let ac = classic();
    let table = ac.to_table();

    assert_eq!(table.version, FORMAT_VERSION);
    assert_eq!(table.alphabet, AlphabetKind::Unicode);
    assert_eq!(table.nodes.len(), ac.node_count());
    assert_eq!(table.nodes[0].failure_link, 0);
    assert!(table.nodes.iter().enumerate().all(|(i, n)| n.node_id as usize == i));
}

#[test]
fn bytes_round_trip_preserves_matches_and_payloads() {
    let ac = classic();
    let loaded = Automaton::<Unicode>::from_bytes(&ac.to_bytes().unwrap()).unwrap();

    assert_eq!(triples(&loaded, "ahishers"), triples(&ac, "ahishers"));
    assert_eq!(loaded.patterns(), ac.patterns());
    assert_eq!(loaded.stats(), ac.stats());
    let payloads: Vec<_> = loaded.search("hers").map(|m| m.payload).collect();
    assert_eq!(payloads, vec![Some("pronoun"), Some("possessive")]);
}

#[test]
fn lazy_mode_round_trips() {
    let mut builder = Builder::<Bytes>::new().output_mode(OutputMode::Lazy);
    for (i, p) in ["c", "bc", "abc", "xabcx"].iter().enumerate() {
        builder.add(p.as_bytes(), i as PatternId).unwrap();
    }
    let ac = builder.build().unwrap();
    let loaded = Automaton::<Bytes>::from_bytes(&ac.to_bytes().unwrap()).unwrap();

    assert_eq!(loaded.output_mode(), OutputMode::Lazy);
    assert_eq!(triples(&loaded, b"xabcxabc"), triples(&ac, b"xabcxabc"));
}

#[test]
fn save_and_load_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/patterns.acm");
    let ac = classic();

    ac.save(&path).unwrap();
    assert!(!path.with_extension("tmp").exists());
    let loaded = Automaton::<Unicode>::load(&path).unwrap();
    assert_eq!(triples(&loaded, "ushers"), triples(&ac, "ushers"));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Automaton::<Unicode>::load(&dir.path().join("missing.acm")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn any_automaton_dispatches_on_stored_alphabet() {
    let bytes_ac = Automaton::<Bytes>::build([(b"ab", 1)]).unwrap();
    let loaded = AnyAutomaton::from_bytes(&bytes_ac.to_bytes().unwrap()).unwrap();
    assert_eq!(loaded.alphabet(), AlphabetKind::Bytes);

    let loaded = AnyAutomaton::from_bytes(&classic().to_bytes().unwrap()).unwrap();
    assert!(matches!(loaded, AnyAutomaton::Unicode(_)));
    assert_eq!(loaded.stats().patterns, 4);
}

#[test]
fn alphabet_mismatch_is_rejected() {
    let bytes_ac = Automaton::<Bytes>::build([(b"ab", 1)]).unwrap();
    let err = Automaton::<Unicode>::from_bytes(&bytes_ac.to_bytes().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        Error::AlphabetMismatch {
            expected: AlphabetKind::Unicode,
            found: AlphabetKind::Bytes,
        }
    ));
}

#[test]
fn future_format_version_is_rejected() {
    let mut table = classic().to_table();
    table.version = FORMAT_VERSION + 1;
    let err = Automaton::<Unicode>::from_table(table).unwrap_err();
    assert!(matches!(err, Error::FormatVersion { .. }));
}

#[test]
fn truncated_bytes_are_rejected() {
    let bytes = classic().to_bytes().unwrap();
    let err = Automaton::<Unicode>::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, Error::Persist(_)));
}

#[test]
fn empty_node_table_is_rejected() {
    let mut table = classic().to_table();
    table.nodes.clear();
    assert!(corrupt_message(Automaton::from_table(table)).contains("empty"));
}

#[test]
fn deeper_failure_link_is_rejected() {
    let mut table = classic().to_table();
    let last = table.nodes.len() - 1;
    table.nodes[1].failure_link = last as u32;
    assert!(corrupt_message(Automaton::from_table(table)).contains("not shallower"));
}

#[test]
fn root_failure_link_must_be_root() {
    let mut table = classic().to_table();
    table.nodes[0].failure_link = 1;
    assert!(corrupt_message(Automaton::from_table(table)).contains("root"));
}

#[test]
fn unclosed_output_is_rejected() {
    let mut table = classic().to_table();
    // Drop "he" from the output of "she".
    let she = table
        .nodes
        .iter()
        .position(|n| n.output == vec![0, 1])
        .unwrap();
    table.nodes[she].output = vec![1];
    assert!(corrupt_message(Automaton::from_table(table)).contains("not closed"));
}

#[test]
fn output_of_wrong_length_is_rejected() {
    let mut table = classic().to_table();
    let he = table.nodes.iter().position(|n| n.output == vec![0]).unwrap();
    table.nodes[he].output = vec![3];
    assert!(corrupt_message(Automaton::from_table(table)).contains("wrong length"));
}

#[test]
fn missing_pattern_is_rejected() {
    let mut table = classic().to_table();
    table.patterns.truncate(3);
    assert!(corrupt_message(Automaton::from_table(table)).contains("missing pattern"));
}

#[test]
fn shared_child_is_rejected() {
    let mut table = classic().to_table();
    let child = table.nodes[0].children[0].1;
    table.nodes[0].children.push((u32::from('z'), child));
    assert!(corrupt_message(Automaton::from_table(table)).contains("more than one parent"));
}

#[test]
fn unreachable_node_is_rejected() {
    let mut table = classic().to_table();
    let id = table.nodes.len() as u32;
    table.nodes.push(NodeRecord {
        node_id: id,
        children: Vec::new(),
        failure_link: 0,
        output: Vec::new(),
    });
    assert!(corrupt_message(Automaton::from_table(table)).contains("unreachable"));
}

#[test]
fn out_of_range_byte_symbol_is_rejected() {
    let mut table = Automaton::<Bytes>::build([(b"a", 1)]).unwrap().to_table();
    table.nodes[0].children[0].0 = 0x1_0000;
    let err = Automaton::<Bytes>::from_table(table).unwrap_err();
    assert!(matches!(err, Error::Corrupt(m) if m.contains("invalid bytes symbol")));
}
