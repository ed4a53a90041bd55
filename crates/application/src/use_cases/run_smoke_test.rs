//! Run Smoke Test Use Case
//!
//! Runs the readiness wait and the three checks in order and collects their
//! outcomes into a [`SmokeReport`]. Every step runs regardless of how the
//! previous ones ended.

use std::future::Future;
use std::sync::Arc;

use smokeprobe_domain::request::DEFAULT_TIMEOUT_MS;
use smokeprobe_domain::{
    CheckDetail, CheckFailure, CheckKind, CheckOutcome, CheckRecord, EndpointTarget,
    RenderRequest, SmokeReport,
};
use tokio::time::Instant;
use tracing::info;

use super::{CheckHealth, ProbeCapabilities, ProbeRender, ReadinessPolicy, WaitForReady};
use crate::ApplicationResult;
use crate::ports::{Clock, HttpClient, ReportSink};

/// Options of a smoke run.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeOptions {
    /// Readiness wait policy; `None` skips the wait.
    pub readiness: Option<ReadinessPolicy>,
    /// Timeout applied to each check request.
    pub request_timeout_ms: u64,
    /// Payload of the render probe.
    pub render: RenderRequest,
}

impl Default for SmokeOptions {
    fn default() -> Self {
        Self {
            readiness: Some(ReadinessPolicy::default()),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            render: RenderRequest::default(),
        }
    }
}

/// Use case running a whole smoke test against one target.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let run = RunSmokeTest::new(client, Arc::new(SystemClock::new()), SmokeOptions::default());
///
/// let mut sink = ConsoleReporter::stdout();
/// let report = run.execute(&EndpointTarget::default(), &mut sink).await?;
/// ```
pub struct RunSmokeTest<C: HttpClient + ?Sized> {
    client: Arc<C>,
    clock: Arc<dyn Clock>,
    options: SmokeOptions,
}

impl<C: HttpClient + ?Sized> RunSmokeTest<C> {
    /// Creates the use case.
    pub fn new(client: Arc<C>, clock: Arc<dyn Clock>, options: SmokeOptions) -> Self {
        Self {
            client,
            clock,
            options,
        }
    }

    /// Runs every step and returns the report.
    ///
    /// Check failures end up in the report; they never make this fail.
    ///
    /// # Errors
    ///
    /// Returns an error only if the sink cannot write the report.
    pub async fn execute(
        &self,
        target: &EndpointTarget,
        sink: &mut dyn ReportSink,
    ) -> ApplicationResult<SmokeReport> {
        let started = Instant::now();
        let mut report = SmokeReport::new(target.to_string(), self.clock.now());
        info!(%target, "starting smoke run");
        sink.begin(&report)?;

        let timeout_ms = self.options.request_timeout_ms;

        if let Some(policy) = &self.options.readiness {
            let wait = WaitForReady::new(Arc::clone(&self.client), policy.clone(), timeout_ms);
            let record = timed(CheckKind::Readiness, wait.execute(target)).await;
            emit(&mut report, sink, record)?;
        }

        let health = CheckHealth::new(Arc::clone(&self.client), timeout_ms);
        let record = timed(CheckKind::Health, health.execute(target)).await;
        emit(&mut report, sink, record)?;

        let capabilities = ProbeCapabilities::new(Arc::clone(&self.client), timeout_ms);
        let record = timed(CheckKind::CapabilityProbe, capabilities.execute(target)).await;
        emit(&mut report, sink, record)?;

        let render = ProbeRender::new(
            Arc::clone(&self.client),
            self.options.render.clone(),
            timeout_ms,
        );
        let record = timed(CheckKind::RenderProbe, render.execute(target)).await;
        emit(&mut report, sink, record)?;

        report.duration_ms = elapsed_ms(started);
        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            duration_ms = report.duration_ms,
            "smoke run finished"
        );
        sink.finish(&report)?;

        Ok(report)
    }
}

async fn timed(
    kind: CheckKind,
    check: impl Future<Output = Result<CheckDetail, CheckFailure>>,
) -> CheckRecord {
    let started = Instant::now();
    let outcome = CheckOutcome::from(check.await);
    CheckRecord::new(kind, outcome, elapsed_ms(started))
}

fn emit(
    report: &mut SmokeReport,
    sink: &mut dyn ReportSink,
    record: CheckRecord,
) -> ApplicationResult<()> {
    sink.record(&record)?;
    report.push(record);
    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{HttpClientError, ReportSinkError};
    use crate::use_cases::test_support::{MockHttpClient, json_response};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smokeprobe_domain::HttpMethod;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp")
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        fail_on_record: bool,
    }

    impl ReportSink for RecordingSink {
        fn begin(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
            self.events.push(format!("begin {}", report.target));
            Ok(())
        }

        fn record(&mut self, record: &CheckRecord) -> Result<(), ReportSinkError> {
            if self.fail_on_record {
                return Err(ReportSinkError::Io(std::io::Error::other("stdout closed")));
            }
            let status = if record.is_passed() { "passed" } else { "failed" };
            self.events.push(format!("{:?} {status}", record.kind));
            Ok(())
        }

        fn finish(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
            self.events.push(format!("finish {}", report.records.len()));
            Ok(())
        }
    }

    fn healthy_service() -> MockHttpClient {
        MockHttpClient::new()
            .on(
                HttpMethod::Get,
                "/api/health",
                json_response(200, json!({"status": "ok"})),
            )
            .on(
                HttpMethod::Get,
                "/api/test-v3",
                json_response(200, json!({"success": true, "results": {}})),
            )
            .on(
                HttpMethod::Post,
                "/api/test-v3",
                json_response(
                    200,
                    json!({"success": true, "result": {"type": "hero", "hasHtml": true, "hasCss": true}}),
                ),
            )
    }

    fn run_with(client: MockHttpClient, options: SmokeOptions) -> RunSmokeTest<MockHttpClient> {
        RunSmokeTest::new(Arc::new(client), Arc::new(FixedClock), options)
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_checks_pass() {
        let run = run_with(healthy_service(), SmokeOptions::default());
        let mut sink = RecordingSink::default();

        let report = run
            .execute(&EndpointTarget::default(), &mut sink)
            .await
            .expect("run completes");

        assert!(report.all_passed());
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.target, "http://localhost:3000");
        assert_eq!(report.started_at, FixedClock.now());
        assert_eq!(
            sink.events,
            vec![
                "begin http://localhost:3000",
                "Readiness passed",
                "Health passed",
                "CapabilityProbe passed",
                "RenderProbe passed",
                "finish 4",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_later_checks() {
        let client = MockHttpClient::new()
            .on(
                HttpMethod::Get,
                "/api/health",
                Err(HttpClientError::Timeout { timeout_ms: 100 }),
            )
            .on(
                HttpMethod::Get,
                "/api/test-v3",
                json_response(500, json!({"error": "boom"})),
            )
            .on(
                HttpMethod::Post,
                "/api/test-v3",
                json_response(
                    200,
                    json!({"success": true, "result": {"type": "hero", "hasHtml": true, "hasCss": false}}),
                ),
            );
        let run = run_with(client, SmokeOptions::default());
        let mut sink = RecordingSink::default();

        let report = run
            .execute(&EndpointTarget::default(), &mut sink)
            .await
            .expect("run completes");

        assert_eq!(
            sink.events,
            vec![
                "begin http://localhost:3000",
                "Readiness failed",
                "Health failed",
                "CapabilityProbe failed",
                "RenderProbe passed",
                "finish 4",
            ]
        );
        assert_eq!(report.failed_count(), 3);
        assert!(matches!(
            report.record(CheckKind::Readiness).map(|r| &r.outcome),
            Some(CheckOutcome::Failed(CheckFailure::ReadinessTimeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_without_wait() {
        let options = SmokeOptions {
            readiness: None,
            ..SmokeOptions::default()
        };
        let client = Arc::new(MockHttpClient::new());
        let run = RunSmokeTest::new(client.clone(), Arc::new(FixedClock), options);
        let mut sink = RecordingSink::default();

        let report = run
            .execute(&EndpointTarget::default(), &mut sink)
            .await
            .expect("run completes");

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.failed_count(), 3);
        assert!(report.record(CheckKind::Readiness).is_none());
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_request_timeout_is_applied() {
        let options = SmokeOptions {
            readiness: None,
            request_timeout_ms: 750,
            ..SmokeOptions::default()
        };
        let client = Arc::new(healthy_service());
        let run = RunSmokeTest::new(client.clone(), Arc::new(FixedClock), options);

        run.execute(&EndpointTarget::default(), &mut RecordingSink::default())
            .await
            .expect("run completes");

        assert!(client.requests().iter().all(|r| r.timeout_ms == 750));
    }

    #[tokio::test]
    async fn test_sink_error_aborts_run() {
        let options = SmokeOptions {
            readiness: None,
            ..SmokeOptions::default()
        };
        let run = run_with(healthy_service(), options);
        let mut sink = RecordingSink {
            fail_on_record: true,
            ..RecordingSink::default()
        };

        let result = run.execute(&EndpointTarget::default(), &mut sink).await;
        assert!(matches!(result, Err(crate::ApplicationError::Report(_))));
    }
}
