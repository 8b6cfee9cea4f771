// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inspect command implementation.

use std::io::Write;

use acmatch::cli::{InspectArgs, OutputFormat};
use acmatch::error::ExitCode;
use acmatch::persist::AnyAutomaton;

/// Print statistics about a compiled automaton.
pub fn run(args: &InspectArgs) -> anyhow::Result<ExitCode> {
    let stats = AnyAutomaton::load(&args.file)?.stats();
    let mut out = std::io::stdout().lock();

    match args.output {
        OutputFormat::Text => {
            writeln!(out, "file:        {}", args.file.display())?;
            writeln!(out, "alphabet:    {}", stats.alphabet)?;
            writeln!(out, "output mode: {}", stats.output_mode)?;
            writeln!(out, "patterns:    {}", stats.patterns)?;
            writeln!(out, "states:      {}", stats.states)?;
            writeln!(out, "classes:     {}", stats.classes)?;
            writeln!(out, "dense:       {}", stats.dense_states)?;
            writeln!(out, "max depth:   {}", stats.max_depth)?;
            writeln!(out, "heap bytes:  {}", stats.heap_bytes)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &stats)?;
            writeln!(out)?;
        }
    }
    Ok(ExitCode::Success)
}
