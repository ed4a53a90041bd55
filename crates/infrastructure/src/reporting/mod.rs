//! Report sinks for the console.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
