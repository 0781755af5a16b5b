//! Logging bootstrap shared by the Plume binaries.

use anyhow::anyhow;
use plume_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed, which callers that may run
/// twice (tests, embedded use) can ignore.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::debug!(
        target: "plume-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
