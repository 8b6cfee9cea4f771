// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::tempdir;

#[test]
fn ids_are_line_numbers_and_blank_lines_are_skipped() {
    let set = PatternSet::parse(b"he\n\nshe\r\nhis\n");
    let ids: Vec<_> = set.entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert_eq!(set.entries()[1].pattern, b"she");
}

#[test]
fn tab_separates_payload() {
    let set = PatternSet::parse(b"cat\tanimal\tpet\ndog\n");
    assert_eq!(set.entries()[0].pattern, b"cat");
    assert_eq!(set.entries()[0].payload.as_deref(), Some("animal\tpet"));
    assert_eq!(set.entries()[1].payload, None);
}

#[test]
fn empty_pattern_with_payload_fails_compile() {
    let set = PatternSet::parse(b"ok\n\torphan\n");
    let err = set.compile(AlphabetKind::Unicode, OutputMode::Eager).unwrap_err();
    assert!(matches!(err, Error::InvalidPatternLine { line: 2 }));
}

#[test]
fn empty_pattern_error_names_file_line_past_blank_lines() {
    let set = PatternSet::parse(b"he\n\n\nshe\n\ttrailing\n");
    let err = set.compile(AlphabetKind::Bytes, OutputMode::Lazy).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid pattern on line 5: patterns must not be empty"
    );
}

#[test]
fn compiles_unicode_automaton() {
    let set = PatternSet::parse("he\nshe\nhis\nhers\tpossessive\n".as_bytes());
    let AnyAutomaton::Unicode(ac) = set
        .compile(AlphabetKind::Unicode, OutputMode::Eager)
        .unwrap()
    else {
        panic!("expected unicode automaton");
    };
    let found: Vec<_> = ac.search("ushers").map(|m| (m.id, m.payload)).collect();
    assert_eq!(
        found,
        vec![(1, None), (2, None), (4, Some("possessive"))]
    );
}

#[test]
fn non_utf8_pattern_needs_byte_alphabet() {
    let set = PatternSet::parse(b"\xff\xfe\n");
    let err = set.compile(AlphabetKind::Unicode, OutputMode::Eager).unwrap_err();
    assert!(err.to_string().contains("--bytes"));

    let any = set.compile(AlphabetKind::Bytes, OutputMode::Lazy).unwrap();
    let AnyAutomaton::Bytes(ac) = any else {
        panic!("expected byte automaton");
    };
    assert!(ac.contains_any(b"\x00\xff\xfe"));
    assert_eq!(ac.output_mode(), OutputMode::Lazy);
}

#[test]
fn load_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "alpha\nbeta\n").unwrap();

    let set = PatternSet::load(&path).unwrap();
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
}
