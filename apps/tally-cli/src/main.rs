//! # tally
//!
//! Terminal front-end for the Tally calculator.
//!
//! ## Usage
//! ```bash
//! # Interactive: one line of keys at a time, display printed after each line
//! tally
//! 12 + 3 =
//! 15
//!
//! # One-shot
//! tally --keys "5 + 2 = ="
//!
//! # Expression mode with an explicit settings file
//! tally --mode expression --settings ./settings.toml --keys "(2+3)*4 ="
//! ```
//!
//! ## Logging
//! Diagnostics go to stderr. Set `RUST_LOG=tally_core=debug` to watch
//! error transitions and mode switches.

mod error;
mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tally_core::{CalculatorState, Mode};
use tally_settings::Settings;

use crate::error::{CliError, CliResult};
use crate::session::{Outcome, Session};

/// Parsed command line.
#[derive(Debug, Default)]
struct CliArgs {
    settings: Option<PathBuf>,
    mode: Option<Mode>,
    keys: Option<String>,
    help: bool,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tally: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    let settings = Settings::load_or_default(args.settings);
    let mut options = settings.options();
    if let Some(mode) = args.mode {
        options.mode = mode;
    }
    info!(mode = %options.mode, precision = options.precision, "Starting calculator");

    let mut session = Session::new(CalculatorState::with_options(options));

    if let Some(keys) = args.keys {
        if let Outcome::Print(lines) = session.feed_line(&keys) {
            print_lines(&lines)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match session.feed_line(&line?) {
            Outcome::Print(lines) => print_lines(&lines)?,
            Outcome::Quit => break,
        }
    }

    debug!(entries = session.state().history().len(), "Input finished");
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" | "-s" => {
                let value = args.next().ok_or(CliError::MissingValue(arg))?;
                parsed.settings = Some(PathBuf::from(value));
            }
            "--mode" | "-m" => {
                let value = args.next().ok_or(CliError::MissingValue(arg))?;
                parsed.mode = Some(value.parse()?);
            }
            "--keys" | "-k" => {
                let value = args.next().ok_or(CliError::MissingValue(arg))?;
                parsed.keys = Some(value);
            }
            "--help" | "-h" => parsed.help = true,
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(parsed)
}

fn print_lines(lines: &[String]) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn print_help() {
    println!("Tally - keypad calculator");
    println!();
    println!("Usage: tally [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --settings <PATH>   Settings file (default: platform config dir)");
    println!("  -m, --mode <MODE>       sequential | expression (overrides settings)");
    println!("  -k, --keys <KEYS>       Run one line of keys and print the display");
    println!("  -h, --help              Show this help message");
    println!();
    println!("Keys: 0-9 . + - * / = % +/- BS CE C MS MR M+ M- MC TAX+ TAX- ( )");
    println!("      MODE:sequential MODE:expression");
    println!("Commands: HISTORY, QUIT");
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - ERROR: unrecoverable failures
/// - WARN: skipped input, fallback settings
/// - INFO: settings loaded, session start
/// - DEBUG: error transitions, mode switches
/// - TRACE: history records
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tally=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================
