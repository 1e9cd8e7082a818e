//! Placeholder substitution engine.
//!
//! Three pieces, composed per line:
//!
//! - [`normalize`] turns a raw placeholder name into a lookup key
//! - [`Resolver`] looks a name up in an [`EnvStore`](crate::env::EnvStore)
//!   through the direct, encoded and default tiers
//! - [`rewrite_line`] finds placeholders in a line and substitutes them

mod key;
mod resolve;
mod rewrite;


pub use key::normalize;
pub use resolve::{Resolver, Tier};
pub use rewrite::{
    Placeholder, placeholders, rewrite_bytes_counted, rewrite_line, rewrite_line_counted,
    rewrite_line_with_prefix,
};
