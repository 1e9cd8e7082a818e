//! Run configuration.
//!
//! There is no configuration file: everything comes from the command line
//! and is checked here before any file is opened.

use crate::error::{EnvsubsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a single substitution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Prepended to every lookup key. Fixed for the whole run.
    pub prefix: String,
    /// Print each placeholder and its lookup keys to the listing stream.
    pub list: bool,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            prefix: prefix.into(),
            list: false,
        }
    }

    /// Reject configurations that would destroy the input.
    ///
    /// Creating the output truncates it, so an output that resolves to the
    /// input file would be emptied before the first line is read.
    pub fn validate(&self) -> Result<()> {
        if same_file(&self.input, &self.output) {
            return Err(EnvsubsError::Usage(format!(
                "input and output must be different files: '{}'",
                self.input.display()
            )));
        }
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
