//! Diff parsers.

mod unified;

pub use unified::{ParseError, parse_unified_diff};
