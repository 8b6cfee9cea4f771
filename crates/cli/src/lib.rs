//! Aho–Corasick multi-pattern matching.
//!
//! Build an [`Automaton`] once from a set of patterns, then scan any number
//! of texts in a single left-to-right pass each, reporting every occurrence
//! of every pattern, overlapping ones included.

pub mod automaton;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod patterns;
pub mod persist;
pub mod reader;
pub mod walker;

pub use automaton::{
    Alphabet, AlphabetKind, Automaton, Builder, Bytes, Match, Matches, OutputMode, PatternId,
    PatternInfo, StateId, Stats, Stream, Unicode,
};
pub use cli::{Cli, Command, OutputFormat};
pub use error::{Error, ExitCode, Result};
pub use patterns::{PatternEntry, PatternSet};
pub use persist::AnyAutomaton;
pub use reader::{ChunkReader, ScanSummary};
pub use walker::{FileWalker, WalkStats, WalkerConfig};
