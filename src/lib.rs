//! Envsubs: line-oriented `${name:default}` substitution from prefixed
//! environment variables.
//!
//! The engine lives in [`substitute`]; [`run`] wires it to an input file, an
//! output file and an [`env::EnvStore`].

pub mod config;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod run;
pub mod substitute;
