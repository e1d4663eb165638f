//! Span exporter writing OTLP/JSON batches to a rotating file.

use super::otlp_json;
use super::rotating_file::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exports each batch as a single JSON line.
///
/// Writes happen inline in `export`; the plugin is single-threaded and the
/// simple span processor hands over one span at a time.
pub struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    pub const fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let line = otlp_json::encode_batch(&self.resource, &batch).to_string();
        let result = self.file.write_line(&line).map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span to `file`.
pub fn tracer_provider(file: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn exporter_in(dir: &tempfile::TempDir) -> (FileSpanExporter, std::path::PathBuf) {
        let path = dir.path().join("spans.json");
        let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "Bookshelf")]);
        (FileSpanExporter::new(RotatingFile::new(path.clone()), resource), path)
    }

    #[test]
    fn each_batch_is_one_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let (mut exporter, path) = exporter_in(&dir);

        exporter.export(vec![]).now_or_never().unwrap().unwrap();
        exporter.export(vec![]).now_or_never().unwrap().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let doc: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(doc["resourceSpans"].is_array());
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (mut exporter, path) = exporter_in(&dir);

        exporter.shutdown();
        assert!(exporter.export(vec![]).now_or_never().unwrap().is_err());
        assert!(!path.exists());
    }
}
