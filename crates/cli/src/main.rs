// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! acmatch CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use acmatch::cli::{Cli, Command};
use acmatch::error::ExitCode;

mod cmd_build;
mod cmd_inspect;
mod cmd_scan;

fn init_logging() {
    let filter = EnvFilter::try_from_env("ACMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("acmatch: {}", e);
            match e.downcast_ref::<acmatch::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Build(args)) => cmd_build::run(&cli, args),
        Some(Command::Scan(args)) => cmd_scan::run(&cli, args),
        Some(Command::Inspect(args)) => cmd_inspect::run(args),
        Some(Command::Completions(args)) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "acmatch",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::Success)
        }
    }
}
