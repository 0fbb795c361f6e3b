//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → RotatingFile
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: spans appended to
//!   `~/.local/share/zellij/pixsearch/pixsearch-spans.jsonl`, one JSON object
//!   per line
//! - **Automatic Rotation**: the file rotates at 10 MiB, keeping 3 numbered
//!   backups
//! - **Level Filtering**: `trace_level` from the plugin configuration, as an
//!   `EnvFilter` directive (default `info`)
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: `SpanExporter` writing JSON lines
//! - [`rotation`]: Size-rotated file with numbered backups

pub mod exporter;
pub mod init;
pub mod rotation;

pub use init::init_tracing;
