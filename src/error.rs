//! Error types for the envsubs CLI.
//!
//! Uses thiserror for derive macros. Every variant is fatal for the run and
//! maps to one exit code; recoverable problems (such as a malformed hex value
//! in the encoded lookup tier) never reach this type.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for envsubs runs.
#[derive(Error, Debug)]
pub enum EnvsubsError {
    /// Wrong arguments. Carries the rendered usage text.
    #[error("{0}")]
    Usage(String),

    #[error("failed to open input file '{}': {source}", path.display())]
    InputOpen { path: PathBuf, source: io::Error },

    #[error("failed to read input file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to create output file '{}': {source}", path.display())]
    OutputCreate { path: PathBuf, source: io::Error },

    #[error("failed to write output file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The `--list` stream (stdout) could not be written.
    #[error("failed to write placeholder listing: {source}")]
    Listing { source: io::Error },
}

impl EnvsubsError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvsubsError::Usage(_) => exit_codes::USAGE_ERROR,
            EnvsubsError::InputOpen { .. } | EnvsubsError::Read { .. } => {
                exit_codes::INPUT_FAILURE
            }
            EnvsubsError::OutputCreate { .. }
            | EnvsubsError::Write { .. }
            | EnvsubsError::Listing { .. } => exit_codes::OUTPUT_FAILURE,
        }
    }
}

/// Result type alias for envsubs operations.
pub type Result<T> = std::result::Result<T, EnvsubsError>;
