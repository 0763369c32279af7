//! Subscriber setup: env filter, stderr formatter, optional trace file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "flicklist";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, then `config.log_level`, then
/// `"info"`. Events are formatted to stderr. When `config.trace_file` is set,
/// spans are additionally exported as OTLP JSON to that file.
///
/// Only the first call in a process takes effect; later calls are no-ops, so
/// tests and binaries can both call it freely.
///
/// # Example
///
/// ```rust
/// use flicklist::observability::init_tracing;
/// use flicklist::Config;
///
/// let config = Config {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.as_deref().unwrap_or("info"))
    });

    let otel_layer = config.trace_file.clone().map(|path| {
        let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
        let provider = tracer::file_tracer_provider(path, resource, SERVICE_NAME);
        OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(otel_layer)
        .try_init();

    if result.is_ok() {
        tracing::debug!(
            trace_file = ?config.trace_file,
            "tracing initialized"
        );
    }
}
