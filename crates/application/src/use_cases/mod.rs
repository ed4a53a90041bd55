//! Use cases
//!
//! One use case per step of a smoke run, plus the orchestrator that runs
//! them in order and collects their outcomes.

mod check_health;
mod exchange;
mod probe_capabilities;
mod probe_render;
mod run_smoke_test;
mod wait_for_ready;

#[cfg(test)]
pub(crate) mod test_support;

pub use check_health::CheckHealth;
pub use probe_capabilities::ProbeCapabilities;
pub use probe_render::ProbeRender;
pub use run_smoke_test::{RunSmokeTest, SmokeOptions};
pub use wait_for_ready::{ReadinessPolicy, WaitForReady};
