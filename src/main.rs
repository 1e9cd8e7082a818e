//! Envsubs: substitute `${name:default}` placeholders from prefixed
//! environment variables.
//!
//! This is the main entry point for the `envsubs` CLI. It parses arguments,
//! installs diagnostic logging, runs the substitution and maps errors to
//! exit codes.

mod cli;

use cli::Cli;
use envsubs::{exit_codes, logging, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests also arrive here and go to stdout.
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            return ExitCode::from(code as u8);
        }
    };

    logging::init(&cli.log_level, cli.verbose);

    match run::run(&cli.into_config()) {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
