// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::fs;
use tempfile::TempDir;

fn create_test_tree(dir: &Path) {
    fs::create_dir_all(dir.join("docs")).unwrap();
    fs::write(dir.join("docs/a.txt"), "alpha").unwrap();
    fs::write(dir.join("docs/b.txt"), "beta").unwrap();
    fs::write(dir.join("top.txt"), "top").unwrap();
}

fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn walks_directory_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, stats) = walker.expand(&[tmp.path().to_path_buf()]).unwrap();

    assert_eq!(names(tmp.path(), &files), vec!["docs/a.txt", "docs/b.txt", "top.txt"]);
    assert_eq!(stats.files_found, 3);
}

#[test]
fn respects_gitignore() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());
    fs::write(tmp.path().join(".gitignore"), "docs/\n").unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, _) = walker.expand(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(names(tmp.path(), &files), vec!["top.txt"]);

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        ..Default::default()
    });
    let (files, _) = walker.expand(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(files.len(), 3);
}

#[test]
fn hidden_files_are_opt_in() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".secret"), "x").unwrap();
    fs::write(tmp.path().join("plain"), "x").unwrap();

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, _) = walker.expand(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(names(tmp.path(), &files), vec!["plain"]);

    let scan = ScanConfig {
        hidden: true,
        ..Default::default()
    };
    let walker = FileWalker::new(WalkerConfig::from(&scan));
    let (files, _) = walker.expand(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(names(tmp.path(), &files), vec![".secret", "plain"]);
}

#[test]
fn explicit_files_are_kept_and_deduplicated() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());
    let top = tmp.path().join("top.txt");

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, _) = walker.expand(&[top.clone(), top.clone()]).unwrap();
    assert_eq!(files, vec![top]);
}

#[test]
fn missing_path_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let walker = FileWalker::new(WalkerConfig::default());
    let err = walker.expand(&[tmp.path().join("nope")]).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
