//! Smokeprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the HTTP client, report output and clock)
//! - The smoke run use cases and their orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, HttpClientError, ReportSink, ReportSinkError};
pub use use_cases::{
    CheckHealth, ProbeCapabilities, ProbeRender, ReadinessPolicy, RunSmokeTest, SmokeOptions,
    WaitForReady,
};
