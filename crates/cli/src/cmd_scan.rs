// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan command implementation.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use acmatch::automaton::Match;
use acmatch::cli::{Cli, OutputFormat, ScanArgs};
use acmatch::config::Config;
use acmatch::discovery;
use acmatch::error::{Error, ExitCode};
use acmatch::output::{self, FileMatches, FoundMatch, STDIN_NAME, TextFormatter};
use acmatch::patterns::PatternSet;
use acmatch::persist::AnyAutomaton;
use acmatch::reader::ChunkReader;
use acmatch::walker::{FileWalker, WalkerConfig};

/// What is kept for each match.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Report {
    Matches,
    Count,
    /// Stop at the first match anywhere.
    Quiet,
}

/// Run the scan command.
pub fn run(cli: &Cli, args: &ScanArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let mut config = discovery::load_config(cli.config.as_deref(), &cwd)?;
    apply_flags(&mut config, args)?;

    let automaton = load_automaton(&config, args)?;
    tracing::debug!(
        patterns = automaton.stats().patterns,
        chunk_size = config.scan.chunk_size,
        "scan starting"
    );

    let reader = ChunkReader::new(config.scan.chunk_size);
    let report = if args.quiet {
        Report::Quiet
    } else if args.count {
        Report::Count
    } else {
        Report::Matches
    };

    let results = if args.paths.is_empty() {
        let mut file = FileMatches {
            path: STDIN_NAME.to_string(),
            ..Default::default()
        };
        let stdin = std::io::stdin().lock();
        let summary = reader
            .scan(&automaton, stdin, sink(&mut file.matches, report))
            .map_err(|e| Error::Io {
                path: STDIN_NAME.into(),
                source: e,
            })?;
        file.count = summary.matches;
        vec![file]
    } else {
        let walker = FileWalker::new(WalkerConfig::from(&config.scan));
        let (files, _) = walker.expand(&args.paths)?;

        let found = AtomicBool::new(false);
        files
            .par_iter()
            .map(|path| {
                let mut file = FileMatches {
                    path: path.display().to_string(),
                    ..Default::default()
                };
                if report == Report::Quiet && found.load(Ordering::Relaxed) {
                    return Ok(file);
                }
                let summary = reader.scan_path(&automaton, path, sink(&mut file.matches, report))?;
                file.count = summary.matches;
                if file.count > 0 {
                    found.store(true, Ordering::Relaxed);
                }
                Ok(file)
            })
            .collect::<Result<Vec<_>, Error>>()?
    };

    let any_match = results.iter().any(|f| f.count > 0);
    if report != Report::Quiet {
        write_results(args.output, report == Report::Count, &results)?;
    }

    Ok(if any_match {
        ExitCode::Success
    } else {
        ExitCode::NoMatch
    })
}

/// Apply command-line overrides to the loaded config.
fn apply_flags(config: &mut Config, args: &ScanArgs) -> Result<(), Error> {
    if let Some(chunk_size) = args.chunk_size {
        if chunk_size == 0 {
            return Err(Error::Argument("--chunk-size must be > 0".to_string()));
        }
        config.scan.chunk_size = chunk_size;
    }
    if args.hidden {
        config.scan.hidden = true;
    }
    if args.no_ignore {
        config.scan.git_ignore = false;
    }
    Ok(())
}

fn load_automaton(config: &Config, args: &ScanArgs) -> Result<AnyAutomaton, Error> {
    match (&args.automaton_file, &args.patterns) {
        (Some(path), _) => AnyAutomaton::load(path),
        (None, Some(path)) => PatternSet::load(path)?.compile(
            args.automaton.alphabet(config),
            args.automaton.output_mode(config),
        ),
        (None, None) => Err(Error::Argument(
            "one of --patterns or --automaton is required".to_string(),
        )),
    }
}

/// Match sink for one input.
fn sink(
    matches: &mut Vec<FoundMatch>,
    report: Report,
) -> impl FnMut(Match<'_>) -> ControlFlow<()> + '_ {
    move |m| match report {
        Report::Matches => {
            matches.push(m.into());
            ControlFlow::Continue(())
        }
        Report::Count => ControlFlow::Continue(()),
        Report::Quiet => ControlFlow::Break(()),
    }
}

fn write_results(format: OutputFormat, count_only: bool, results: &[FileMatches]) -> anyhow::Result<()> {
    let stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => {
            let mut text = TextFormatter::new(stdout, count_only);
            for file in results {
                text.write_file(file)?;
            }
            text.finish()?;
        }
        OutputFormat::Json => output::write_json(stdout, results)?,
    }
    Ok(())
}
