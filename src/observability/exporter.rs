//! JSON-lines span exporter.
//!
//! Every finished span becomes one JSON object on its own line:
//!
//! ```json
//! {"timestamp":"2024-05-01T10:00:00.120Z","service":"pixsearch","name":"submit",
//!  "trace_id":"…","span_id":"…","parent_span_id":null,
//!  "start":"2024-05-01T10:00:00.100Z","duration_us":20000,
//!  "attributes":{"input_len":4},"events":[],"status":"unset"}
//! ```
//!
//! Spans are exported synchronously through the SDK's simple processor; the
//! plugin is single threaded and has no runtime to drive a batch exporter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};

use super::rotation::RotatingFile;

/// Service name used until the SDK hands over a resource.
pub const SERVICE_NAME: &str = "pixsearch";

/// Writes finished spans to a [`RotatingFile`], one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    #[must_use]
    pub fn new(file: RotatingFile) -> Self {
        Self {
            file,
            service: SERVICE_NAME.to_string(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn span_to_json(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "time": rfc3339(event.timestamp),
                    "name": event.name,
                    "attributes": attributes_to_json(&event.attributes),
                })
            })
            .collect();

        json!({
            "timestamp": rfc3339(span.end_time),
            "service": self.service,
            "name": span.name,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "start": rfc3339(span.start_time),
            "duration_us": duration_us,
            "attributes": attributes_to_json(&span.attributes),
            "events": events,
            "status": status_to_json(&span.status),
        })
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.file.append_line(&self.span_to_json(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(name) = resource.get(Key::from_static_str("service.name")) {
            self.service = name.as_str().into_owned();
        }
    }
}

/// Builds a tracer provider exporting through a [`JsonLinesExporter`].
#[must_use]
pub fn create_tracer_provider(file: RotatingFile, resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(JsonLinesExporter::new(file))
        .build()
}

fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn attributes_to_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_to_json(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn status_to_json(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}
