//! Tracing subscriber setup.

use super::exporter;
use super::rotating_file::RotatingFile;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";

const SERVICE_NAME: &str = "Bookshelf";

/// Level used when the configuration leaves `trace_level` unset.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` at the configured level
/// feeding an OpenTelemetry layer that exports to the rotating trace file.
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, the plugin runs without it.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let file = RotatingFile::new(data_dir.join(TRACE_FILE_NAME));
    let provider = exporter::tracer_provider(file, resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
