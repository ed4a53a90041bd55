//! Smokeprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus runtime settings.

pub mod adapters;
pub mod config;
pub mod reporting;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{OutputFormat, RawSettings, Settings, SettingsError};
pub use reporting::{ConsoleReporter, JsonReporter};
pub use serialization::{SerializationError, from_json, to_json_stable};
