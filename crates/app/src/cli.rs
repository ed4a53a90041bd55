//! Command-line surface.

use clap::Parser;
use smokeprobe_domain::probe::DEFAULT_BLOCK_TYPE;
use smokeprobe_domain::request::DEFAULT_TIMEOUT_MS;
use smokeprobe_domain::target::DEFAULT_BASE_URL;
use smokeprobe_infrastructure::config::DEFAULT_READY_TIMEOUT_MS;
use smokeprobe_infrastructure::{OutputFormat, RawSettings};

/// Smoke test for the V3 block rendering service.
///
/// Waits for the service, then checks `/api/health`, inspects the block
/// registry with `GET /api/test-v3` and renders one block with
/// `POST /api/test-v3`.
#[derive(Debug, Parser)]
#[command(name = "smokeprobe", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the service under test.
    #[arg(long, env = "SMOKEPROBE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// How long to wait for `/api/health` before running the checks.
    #[arg(long, env = "SMOKEPROBE_READY_TIMEOUT_MS", default_value_t = DEFAULT_READY_TIMEOUT_MS)]
    ready_timeout_ms: u64,

    /// Skip the readiness wait.
    #[arg(long)]
    no_wait: bool,

    /// Timeout of each check request.
    #[arg(long, env = "SMOKEPROBE_REQUEST_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    request_timeout_ms: u64,

    /// Block type rendered by the render probe.
    #[arg(long, env = "SMOKEPROBE_BLOCK_TYPE", default_value = DEFAULT_BLOCK_TYPE)]
    block_type: String,

    /// Props of the rendered block, as a JSON object.
    #[arg(long, env = "SMOKEPROBE_PROPS")]
    props: Option<String>,

    /// Report format: `text` or `json`.
    #[arg(long, env = "SMOKEPROBE_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Exit with status 1 when any check fails.
    #[arg(long, env = "SMOKEPROBE_STRICT")]
    strict: bool,
}

impl From<Cli> for RawSettings {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            ready_timeout_ms: cli.ready_timeout_ms,
            no_wait: cli.no_wait,
            request_timeout_ms: cli.request_timeout_ms,
            block_type: cli.block_type,
            props: cli.props,
            format: cli.format,
            strict: cli.strict,
        }
    }
}
