//! Smokeprobe Domain - Core types
//!
//! This crate defines the data model for the block render smoke test runner:
//! the target service, the payload shapes it exchanges, and the report
//! produced by a run. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod probe;
pub mod report;
pub mod request;
pub mod response;
pub mod target;

pub use error::{DomainError, DomainResult};
pub use probe::{
    BlockCapability, CapabilityProbeResponse, RenderMetrics, RenderOutcome, RenderRequest,
    RenderResponse, RenderSummary,
};
pub use report::{CheckDetail, CheckFailure, CheckKind, CheckOutcome, CheckRecord, SmokeReport};
pub use request::{HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use target::EndpointTarget;
