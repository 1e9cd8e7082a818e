//! Placeholder scanning and line rewriting.
//!
//! # Syntax
//!
//! - `${name}` - substitutes the resolved value of `name`, or the empty string
//! - `${name:default}` - substitutes the resolved value, or `default`
//!
//! `name` may not contain `{`, `}` or `:`. `default` may not contain `{` or
//! `}` but may contain further `:` characters. Anything that does not match
//! (an unterminated `${name`, a `{` inside the name) is copied through as
//! literal text.
//!
//! Matches are replaced in a single left-to-right pass. Substituted values
//! are never scanned again, so a value containing `${...}` lands in the
//! output verbatim.

use super::resolve::Resolver;
use crate::env::EnvStore;
use regex::bytes::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

// Byte-oriented so that input which is not valid UTF-8 still substitutes.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)\$\{([^:{}]*)(?::([^{}]*))?\}").expect("Invalid placeholder regex")
});

/// A single placeholder match within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Raw name between `${` and the first `:` or `}`.
    pub name: &'a [u8],
    /// Default text; empty when absent or written as `${name:}`.
    pub default: &'a [u8],
    /// Byte range of the whole `${...}` token in the line.
    pub span: Range<usize>,
}

impl<'a> Placeholder<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        Self {
            name: caps.get(1).map_or(&[][..], |m| m.as_bytes()),
            default: caps.get(2).map_or(&[][..], |m| m.as_bytes()),
            span: caps.get(0).map_or(0..0, |m| m.range()),
        }
    }
}

/// Iterate over the placeholders in `line`, left to right.
pub fn placeholders<L: AsRef<[u8]> + ?Sized>(line: &L) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_REGEX
        .captures_iter(line.as_ref())
        .map(|caps| Placeholder::from_captures(&caps))
}

/// Rewrite every placeholder in `line` using `resolver`.
///
/// # Examples
///
/// ```
/// use envsubs::env::vars;
/// use envsubs::substitute::{rewrite_line, Resolver};
///
/// let resolver = Resolver::new("APP_", vars([("APP_DB_HOST", "db1.internal")]));
/// assert_eq!(rewrite_line("Host=${DB.HOST:localhost}", &resolver), "Host=db1.internal");
/// assert_eq!(rewrite_line("Port=${db.port:5432}", &resolver), "Port=5432");
/// ```
pub fn rewrite_line<E: EnvStore>(line: &str, resolver: &Resolver<E>) -> String {
    rewrite_line_counted(line, resolver).0
}

/// Like [`rewrite_line`], also returning the number of placeholders replaced.
pub fn rewrite_line_counted<E: EnvStore>(line: &str, resolver: &Resolver<E>) -> (String, usize) {
    let (bytes, count) = rewrite_bytes_counted(line.as_bytes(), resolver);
    // Only decoded encoded-tier values can introduce invalid UTF-8 here.
    (String::from_utf8_lossy(&bytes).into_owned(), count)
}

/// Rewrite a raw byte line. Bytes outside placeholders are copied through
/// unchanged, whatever their encoding.
pub fn rewrite_bytes_counted<E: EnvStore>(
    line: &[u8],
    resolver: &Resolver<E>,
) -> (Vec<u8>, usize) {
    let mut result = Vec::with_capacity(line.len());
    let mut last = 0;
    let mut count = 0;

    for placeholder in placeholders(line) {
        result.extend_from_slice(&line[last..placeholder.span.start]);
        result.extend_from_slice(&resolver.resolve_bytes(placeholder.name, placeholder.default));
        last = placeholder.span.end;
        count += 1;
    }
    result.extend_from_slice(&line[last..]);

    (result, count)
}

/// One-shot rewrite with an ad hoc prefix and store.
pub fn rewrite_line_with_prefix<E: EnvStore>(line: &str, prefix: &str, store: E) -> String {
    rewrite_line(line, &Resolver::new(prefix, store))
}
