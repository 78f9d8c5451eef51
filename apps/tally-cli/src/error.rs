//! # CLI Error Types
//!
//! Failures that stop the `tally` binary before or while reading input.
//! Calculator errors are not among them: those are shown on the display.
//! Neither are settings errors: a bad settings file falls back to defaults.

use thiserror::Error;

use tally_core::ParseError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: '{0}'. Try --help")]
    UnknownArgument(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
