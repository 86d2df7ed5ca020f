//! Diagnostics for a single CLI invocation.
//!
//! Logs always go to stderr: stdout carries the response payload and must stay parseable
//! when piped into other tools.

use std::io::{self, IsTerminal};

use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Registry, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};
use crate::error::CliError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. `RUST_LOG` directives refine the configured level.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init(logging: &LoggingSettings) -> Result<(), CliError> {
    let filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(stderr_layer(logging.format, io::stderr().is_terminal()))
        .with(filter)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|err| CliError::Telemetry(format!("failed to install tracing subscriber: {err}")))
}

/// Formatting layer for stderr; colours only when stderr is a terminal.
fn stderr_layer(format: LogFormat, ansi: bool) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_ansi(ansi)
            .with_target(false)
            .without_time()
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn second_install_is_a_telemetry_error() {
        let logging = LoggingSettings {
            level: LevelFilter::OFF,
            format: LogFormat::Compact,
        };
        let first = init(&logging);
        let second = init(&logging);
        assert!(first.is_ok() || matches!(first, Err(CliError::Telemetry(_))));
        assert!(matches!(second, Err(CliError::Telemetry(_))));
    }
}
