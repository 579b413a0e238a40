// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for insomnia2md.
//!
//! This binary provides the `insomnia2md` command for converting an Insomnia
//! workspace export into a directory of Markdown documentation.

use insomnia2md::{export, parser};
use lexopt::prelude::*;
use snafu::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Date of the last release, shown by `--about`.
const LAST_UPDATED: &str = "2026-10-18";

struct Cli {
    input: Option<PathBuf>,
    output: PathBuf,
    about: bool,
    dry_run: bool,
    quiet: bool,
    verbose: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("{source}"))]
    Load { source: parser::LoadError },

    #[snafu(display("{source}"))]
    Export { source: export::ExportError },
}

fn print_help() {
    println!(
        "\
{name} {version}
{description}

Usage: {name} [OPTIONS] -i <INPUT>

Options:
  -i, --input <INPUT>    Insomnia JSON export to convert
  -o, --output <OUTPUT>  Destination directory for Markdown files (default: .)
      --about            Print information about {name} and exit

Other options:
  -q, --quiet            Suppress progress messages
  -v, --verbose          Print debug messages
  -n, --dry-run          Show what would be written without writing
  -h, --help             Print help
  -V, --version          Print version

Set RUST_LOG to override the log filter.",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
    );
}

fn print_about() {
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!("Author {}", env!("CARGO_PKG_AUTHORS"));
    println!("Version {}", env!("CARGO_PKG_VERSION"));
    println!("Last update {LAST_UPDATED}");
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    let mut input = None;
    let mut output = PathBuf::from(".");
    let mut about = false;
    let mut dry_run = false;
    let mut quiet = false;
    let mut verbose = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('i') | Long("input") => input = Some(parser.value()?.parse()?),
            Short('o') | Long("output") => output = parser.value()?.parse()?,
            Long("about") => about = true,
            Short('n') | Long("dry-run") => dry_run = true,
            // Last one wins
            Short('q') | Long("quiet") => {
                quiet = true;
                verbose = false;
            }
            Short('v') | Long("verbose") => {
                verbose = true;
                quiet = false;
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input,
        output,
        about,
        dry_run,
        quiet,
        verbose,
    })
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;
    init_tracing(cli.quiet, cli.verbose);

    if cli.about {
        print_about();
        return Ok(());
    }

    let Some(input) = cli.input else {
        println!("Use --help");
        return Ok(());
    };

    let workspace = parser::load_workspace(&input).context(LoadSnafu)?;
    tracing::debug!(title = %workspace.title, resources = workspace.resources.len(), "loaded export");

    let opts = export::ExportOptions {
        dry_run: cli.dry_run,
    };
    export::export_workspace(&workspace, &cli.output, opts).context(ExportSnafu)?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
