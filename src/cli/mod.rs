//! CLI argument parsing for envsubs.
//!
//! Uses clap derive macros for declarative argument definitions. The parsed
//! [`Cli`] is turned into a [`RunConfig`] before anything touches the
//! filesystem.

use clap::{ArgAction, Parser};
use envsubs::config::RunConfig;
use std::path::PathBuf;

/// Envsubs: substitute `${name}` and `${name:default}` placeholders from
/// prefixed environment variables.
///
/// Each placeholder name is uppercased and sanitized to `[A-Z0-9_]`, then
/// looked up as `<PREFIX><NAME>`. If that is unset or empty,
/// `<PREFIX>HEX_<hex of raw name>` is tried and its value hex-decoded.
/// Otherwise the default (or the empty string) is used.
#[derive(Parser, Debug)]
#[command(name = "envsubs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Template file to read.
    pub input: PathBuf,

    /// File to write. Created, or truncated if it exists.
    pub output: PathBuf,

    /// Prefix prepended to every environment lookup key (may be empty).
    #[arg(allow_hyphen_values = true)]
    pub prefix: String,

    /// Default log filter for diagnostics on stderr. `RUST_LOG` overrides it.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Increase diagnostic verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also print every placeholder found and the keys it is looked up under.
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Returns the clap error instead of exiting so the caller controls the
    /// exit code.
    pub fn parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }

    pub fn into_config(self) -> RunConfig {
        RunConfig {
            input: self.input,
            output: self.output,
            prefix: self.prefix,
            list: self.list,
        }
    }
}
