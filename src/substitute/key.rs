//! Placeholder name normalization.

/// Convert a raw placeholder name into its canonical lookup key.
///
/// ASCII letters are uppercased, `.` becomes `_`, and any remaining
/// character outside `[A-Z0-9_]` also becomes `_`. Non-ASCII characters are
/// never case-mapped; each one becomes a single `_`.
///
/// ```
/// use envsubs::substitute::normalize;
///
/// assert_eq!(normalize("db.host"), "DB_HOST");
/// assert_eq!(normalize("my-app.port"), "MY_APP_PORT");
/// ```
pub fn normalize(raw_name: &str) -> String {
    raw_name
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            '.' => '_',
            upper @ ('A'..='Z' | '0'..='9' | '_') => upper,
            _ => '_',
        })
        .collect()
}

/// Normalize a name taken from raw input bytes.
///
/// Invalid UTF-8 sequences count as one disallowed character each.
pub fn normalize_bytes(raw_name: &[u8]) -> String {
    normalize(&String::from_utf8_lossy(raw_name))
}
