//! Exit code constants for the envsubs CLI.
//!
//! - 0: Success
//! - 1: Usage error (wrong number of arguments, unknown flag)
//! - 2: Input failure (open or read)
//! - 3: Output failure (create, write or flush)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Usage error: bad arguments. No file is touched.
pub const USAGE_ERROR: i32 = 1;

/// Input file could not be opened or read.
pub const INPUT_FAILURE: i32 = 2;

/// Output file could not be created, written or flushed.
pub const OUTPUT_FAILURE: i32 = 3;
