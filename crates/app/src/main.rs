//! Smokeprobe - Main Entry Point
//!
//! Parses the configuration, runs the smoke test against the target
//! service and maps the report to the process exit code.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use smokeprobe_application::RunSmokeTest;
use smokeprobe_infrastructure::config::CONFIG_ERROR_EXIT_CODE;
use smokeprobe_infrastructure::{
    ConsoleReporter, JsonReporter, OutputFormat, RawSettings, ReqwestHttpClient, Settings,
    SystemClock,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = match Settings::try_from(RawSettings::from(cli)) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("❌ Invalid configuration: {error}");
            return Ok(ExitCode::from(CONFIG_ERROR_EXIT_CODE));
        }
    };

    tracing::debug!(
        target_url = %settings.target,
        format = %settings.format,
        strict = settings.strict,
        "configuration loaded"
    );

    let client = Arc::new(ReqwestHttpClient::new()?);
    let run = RunSmokeTest::new(
        client,
        Arc::new(SystemClock::new()),
        settings.options.clone(),
    );

    let report = match settings.format {
        OutputFormat::Text => {
            run.execute(&settings.target, &mut ConsoleReporter::stdout())
                .await?
        }
        OutputFormat::Json => {
            run.execute(&settings.target, &mut JsonReporter::stdout())
                .await?
        }
    };

    Ok(ExitCode::from(settings.exit_code(&report)))
}
