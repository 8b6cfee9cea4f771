//! Test helpers for behavioral specifications.
//!
//! Provides a small fluent DSL for running the acmatch binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the acmatch binary
pub fn acmatch_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("acmatch"));
    cmd.env_remove("ACMATCH_CONFIG").env_remove("ACMATCH_LOG");
    cmd
}

/// Start building an acmatch invocation
pub fn acmatch<I, S>(args: I) -> RunBuilder
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RunBuilder {
        args: args.into_iter().map(|a| a.as_ref().to_string()).collect(),
        dir: None,
        stdin: None,
        envs: Vec::new(),
    }
}

/// Fluent builder for one acmatch run
pub struct RunBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RunBuilder {
    /// Run in the given directory
    pub fn pwd(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    /// Feed bytes on standard input
    pub fn stdin(mut self, input: impl AsRef<[u8]>) -> Self {
        self.stdin = Some(input.as_ref().to_vec());
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Assert success (exit 0)
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Assert exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn output(self) -> std::process::Output {
        let mut cmd = acmatch_cmd();
        cmd.args(&self.args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("command should run");
        {
            let mut stdin = child.stdin.take().expect("stdin should be piped");
            if let Some(input) = &self.stdin {
                // The child may exit (e.g. on a config error) before reading stdin.
                if let Err(e) = stdin.write_all(input)
                    && e.kind() != std::io::ErrorKind::BrokenPipe
                {
                    panic!("stdin should accept input: {e:?}");
                }
            }
        }
        child.wait_with_output().expect("command should finish")
    }
}

/// Result of a run, with output assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary test directory with helper methods.
///
/// Auto-creates parent directories and panics on errors.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project holding the classic `he/she/his/hers` pattern file
    pub fn with_patterns() -> Self {
        let temp = Self::empty();
        temp.file("patterns.txt", "he\nshe\nhis\nhers\tpossessive\n");
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write acmatch.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("acmatch.toml", &content);
    }

    /// Write a file, creating parent directories
    pub fn file(&self, path: &str, content: &str) {
        self.bytes(path, content.as_bytes());
    }

    /// Write raw bytes, creating parent directories
    pub fn bytes(&self, path: &str, content: &[u8]) {
        let path = self.dir.path().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}
