//! Logging and tracing.
//!
//! Every module logs through `tracing` macros and `debug_span!` guards. This
//! module installs the subscriber that routes them:
//!
//! ```text
//! tracing ─┬─▶ EnvFilter ─▶ fmt layer ─▶ stderr
//!          └─▶ tracing-opentelemetry ─▶ FileSpanExporter ─▶ OTLP JSON file (optional)
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` in [`Config`](crate::Config) (`FLICKLIST_LOG`)
//! 3. Default: `"info"`
//!
//! The OTLP file is written only when `trace_file` is set
//! (`FLICKLIST_TRACE_FILE`). It rotates at 10 MB and keeps three backups.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
