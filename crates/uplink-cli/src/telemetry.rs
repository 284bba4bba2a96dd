use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for telemetry initialization
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Initialize JSON logging on stderr.
///
/// `RUST_LOG` takes precedence over the configured level. Stdout is left
/// to the converted envelopes.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<()> {
    let env_filter = env_filter(&config.log_level);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_span_list(true)
        .with_current_span(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// `RUST_LOG` when set and valid, otherwise the configured level
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}
