// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build command implementation.

use acmatch::cli::{BuildArgs, Cli};
use acmatch::discovery;
use acmatch::error::ExitCode;
use acmatch::patterns::PatternSet;

/// Compile a pattern file and persist the automaton.
pub fn run(cli: &Cli, args: &BuildArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = discovery::load_config(cli.config.as_deref(), &cwd)?;

    let patterns = PatternSet::load(&args.patterns)?;
    let automaton = patterns.compile(
        args.automaton.alphabet(&config),
        args.automaton.output_mode(&config),
    )?;
    automaton.save(&args.output)?;

    let stats = automaton.stats();
    println!(
        "compiled {} patterns into {} states ({}, {}): {}",
        stats.patterns,
        stats.states,
        stats.alphabet,
        stats.output_mode,
        args.output.display()
    );
    Ok(ExitCode::Success)
}
