//! Deterministic JSON serialization for reports.
//!
//! Output is pretty-printed with 2-space indentation and a trailing newline,
//! UTF-8 without BOM.

mod json;

pub use json::*;
