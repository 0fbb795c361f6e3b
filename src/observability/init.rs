//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through `tracing-opentelemetry` into the
//! JSON-lines exporter. Initialization never fails the plugin: if the data
//! directory cannot be created the plugin simply runs without traces.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::exporter::{create_tracer_provider, SERVICE_NAME};
use super::rotation::RotatingFile;
use crate::infrastructure::paths::{get_data_dir, spans_file};
use crate::Config;

/// Level used when the configuration does not set `trace_level`.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to
/// `~/.local/share/zellij/pixsearch/pixsearch-spans.jsonl`.
///
/// `config.trace_level` accepts any `EnvFilter` directive (`debug`,
/// `pixsearch=trace`, ...); an invalid directive falls back to `info`.
/// Only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(get_data_dir()).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = create_tracer_provider(RotatingFile::new(spans_file()), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level, "tracing initialized");
    }
}
