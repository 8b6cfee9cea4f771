// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::automaton::{AlphabetKind, OutputMode};
use crate::config::Config;

/// Find every occurrence of many patterns in one pass over the input
#[derive(Parser)]
#[command(name = "acmatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "ACMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a pattern file into an automaton file
    Build(BuildArgs),
    /// Scan files or stdin for patterns
    Scan(ScanArgs),
    /// Print statistics about a compiled automaton
    Inspect(InspectArgs),
    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Pattern file: one pattern per line, optional TAB-separated payload
    #[arg(short, long, value_name = "FILE")]
    pub patterns: PathBuf,

    /// Where to write the compiled automaton
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub automaton: AutomatonArgs,
}

/// Flags selecting how patterns are compiled.
#[derive(clap::Args, Default)]
pub struct AutomatonArgs {
    /// Match raw bytes instead of Unicode characters
    #[arg(long)]
    pub bytes: bool,

    /// Follow dictionary links at match time instead of merging outputs
    #[arg(long)]
    pub lazy: bool,
}

impl AutomatonArgs {
    /// Alphabet from the flags, falling back to config.
    pub fn alphabet(&self, config: &Config) -> AlphabetKind {
        if self.bytes {
            AlphabetKind::Bytes
        } else {
            config.automaton.alphabet
        }
    }

    /// Output mode from the flags, falling back to config.
    pub fn output_mode(&self, config: &Config) -> OutputMode {
        if self.lazy {
            OutputMode::Lazy
        } else {
            config.automaton.output
        }
    }
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Files or directories to scan (default: stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Pattern file to compile before scanning
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "automaton_file",
        conflicts_with = "automaton_file"
    )]
    pub patterns: Option<PathBuf>,

    /// Compiled automaton to scan with; its alphabet and output mode are fixed
    #[arg(
        short = 'a',
        long = "automaton",
        value_name = "FILE",
        conflicts_with_all = ["bytes", "lazy"]
    )]
    pub automaton_file: Option<PathBuf>,

    #[command(flatten)]
    pub automaton: AutomatonArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Print only the number of matches per input
    #[arg(long)]
    pub count: bool,

    /// Print nothing; stop at the first match
    #[arg(short, long)]
    pub quiet: bool,

    /// Bytes per read (overrides config)
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Scan hidden files when walking directories
    #[arg(long)]
    pub hidden: bool,

    /// Do not respect .gitignore when walking directories
    #[arg(long)]
    pub no_ignore: bool,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Compiled automaton file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: clap_complete::Shell,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
