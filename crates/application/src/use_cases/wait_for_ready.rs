//! Wait For Ready Use Case
//!
//! Polls the health endpoint with exponential backoff until it answers with
//! a 2xx status or the time budget runs out.

use std::sync::Arc;
use std::time::Duration;

use smokeprobe_domain::{CheckDetail, CheckFailure, EndpointTarget, RequestSpec};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::ports::HttpClient;

/// Backoff and budget for the readiness wait.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessPolicy {
    /// Total time allowed for the service to become ready.
    pub timeout: Duration,
    /// Pause after the first failed poll.
    pub initial_backoff: Duration,
    /// Cap for the pause between polls.
    pub max_backoff: Duration,
    /// Growth factor of the pause.
    pub backoff_multiplier: f64,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
            backoff_multiplier: 2.0,
        }
    }
}

impl ReadinessPolicy {
    /// Creates the default policy with a different budget.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Pause after the given failed attempt (1-indexed).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let multiplier = self.backoff_multiplier.powi(exponent);
        let backoff_ms = self.initial_backoff.as_millis() as f64 * multiplier;
        let capped_ms = backoff_ms.min(self.max_backoff.as_millis() as f64);

        Duration::from_millis(capped_ms as u64)
    }
}

/// Use case for waiting until the service answers its health endpoint.
pub struct WaitForReady<C: HttpClient + ?Sized> {
    client: Arc<C>,
    policy: ReadinessPolicy,
    request_timeout_ms: u64,
}

impl<C: HttpClient + ?Sized> WaitForReady<C> {
    /// Creates the use case.
    pub const fn new(client: Arc<C>, policy: ReadinessPolicy, request_timeout_ms: u64) -> Self {
        Self {
            client,
            policy,
            request_timeout_ms,
        }
    }

    /// Polls until ready or out of budget.
    ///
    /// A poll is always made at the deadline itself, so a zero budget still
    /// gets one attempt.
    ///
    /// # Errors
    ///
    /// Returns `CheckFailure::ReadinessTimeout` when the budget runs out.
    pub async fn execute(&self, target: &EndpointTarget) -> Result<CheckDetail, CheckFailure> {
        let url = target.health_url();
        let start = Instant::now();
        let deadline = start + self.policy.timeout;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            let timeout_ms = self.poll_timeout_ms(remaining);
            let request = RequestSpec::get(url.as_str()).with_timeout_ms(timeout_ms);

            let last_error = match self.client.execute(&request).await {
                Ok(response) if response.is_success() => {
                    info!(attempts, %url, "service is ready");
                    return Ok(CheckDetail::Ready { attempts });
                }
                Ok(response) => format!("HTTP {} {}", response.status.as_u16(), response.reason),
                Err(error) => error.to_string(),
            };
            debug!(attempts, %url, error = %last_error, "service not ready yet");

            let now = Instant::now();
            if now >= deadline {
                let elapsed_ms = u64::try_from(now.duration_since(start).as_millis()).unwrap_or(u64::MAX);
                warn!(attempts, elapsed_ms, %url, "service did not become ready");
                return Err(CheckFailure::ReadinessTimeout {
                    attempts,
                    elapsed_ms,
                    last_error: Some(last_error),
                });
            }

            let pause = self
                .policy
                .backoff_for_attempt(attempts)
                .min(deadline.duration_since(now));
            tokio::time::sleep(pause).await;
        }
    }

    /// Timeout of one poll: the remaining budget, never below the initial
    /// backoff so the poll at the deadline can still get an answer.
    fn poll_timeout_ms(&self, remaining: Duration) -> u64 {
        let budget = remaining.max(self.policy.initial_backoff);
        let budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self.request_timeout_ms.min(budget_ms).max(1)
    }
}
