//! OpenTelemetry tracing exported to a local file.
//!
//! Spans from `tracing` are converted by `tracing-opentelemetry`, encoded as
//! OTLP/JSON, and appended to `bookshelf-otlp.json` in the plugin data
//! directory, one batch per line. The file rotates by size.

mod exporter;
mod init;
mod otlp_json;
mod rotating_file;

pub use init::{init_tracing, TRACE_FILE_NAME};
