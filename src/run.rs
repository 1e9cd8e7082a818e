//! File-to-file substitution run.
//!
//! Reads the input line by line, rewrites each line and writes it to the
//! output before the next line is read. Line terminators (`\n` or `\r\n`)
//! are stripped on input and every output line ends with a single `\n`.
//! Lines are handled as raw bytes, so input in any ASCII-compatible encoding
//! passes through with only its placeholders replaced.
//!
//! Both files are closed on every exit path when their handles drop. Output
//! written before a failure stays on disk; nothing is rolled back.

use crate::config::RunConfig;
use crate::env::{EnvStore, ProcessEnv};
use crate::error::{EnvsubsError, Result};
use crate::substitute::{Resolver, placeholders, rewrite_bytes_counted};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub substitutions: usize,
}

/// Run against the process environment, listing to stdout.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut listing = stdout.lock();
    run_with(config, ProcessEnv, &mut listing)
}

/// Run against an arbitrary store. Placeholder listings (when
/// `config.list` is set) go to `listing`.
pub fn run_with<E: EnvStore, L: Write>(
    config: &RunConfig,
    store: E,
    listing: &mut L,
) -> Result<RunSummary> {
    config.validate()?;

    let input = File::open(&config.input).map_err(|source| EnvsubsError::InputOpen {
        path: config.input.clone(),
        source,
    })?;
    let output = File::create(&config.output).map_err(|source| EnvsubsError::OutputCreate {
        path: config.output.clone(),
        source,
    })?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        prefix = %config.prefix,
        "starting substitution"
    );

    let resolver = Resolver::new(config.prefix.as_str(), store);
    let mut writer = BufWriter::new(output);
    let summary = rewrite_stream(
        BufReader::new(input),
        &mut writer,
        &resolver,
        config,
        listing,
    )?;
    writer.flush().map_err(|source| write_error(&config.output, source))?;

    info!(
        lines = summary.lines,
        substitutions = summary.substitutions,
        "substitution complete"
    );
    Ok(summary)
}

fn rewrite_stream<R, W, E, L>(
    mut reader: R,
    writer: &mut W,
    resolver: &Resolver<E>,
    config: &RunConfig,
    listing: &mut L,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: EnvStore,
    L: Write,
{
    let mut summary = RunSummary::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| EnvsubsError::Read {
                path: config.input.clone(),
                source,
            })?;
        if read == 0 {
            break;
        }
        strip_line_ending(&mut line);
        summary.lines += 1;

        if config.list {
            list_placeholders(summary.lines, &line, resolver, listing)
                .map_err(|source| EnvsubsError::Listing { source })?;
        }

        let (rewritten, count) = rewrite_bytes_counted(&line, resolver);
        writer
            .write_all(&rewritten)
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|source| write_error(&config.output, source))?;

        summary.substitutions += count;
    }

    Ok(summary)
}

/// Drop a trailing `\n` and then a trailing `\r`.
fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

/// Write one `line:column name => direct_key, encoded_key` entry per
/// placeholder. Columns are 1-based and counted in characters.
fn list_placeholders<E: EnvStore, L: Write>(
    line_number: usize,
    line: &[u8],
    resolver: &Resolver<E>,
    listing: &mut L,
) -> io::Result<()> {
    for placeholder in placeholders(line) {
        let column = String::from_utf8_lossy(&line[..placeholder.span.start])
            .chars()
            .count()
            + 1;
        writeln!(
            listing,
            "{}:{} {} => {}, {}",
            line_number,
            column,
            String::from_utf8_lossy(placeholder.name),
            resolver.direct_key(placeholder.name),
            resolver.encoded_key(placeholder.name)
        )?;
    }
    Ok(())
}

fn write_error(path: &Path, source: io::Error) -> EnvsubsError {
    EnvsubsError::Write {
        path: path.to_path_buf(),
        source,
    }
}
