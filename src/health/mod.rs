//! The pole health core: status classification, telemetry ingestion, and
//! alert evaluation. Everything here is either a pure function or a single
//! database transaction; HTTP concerns live in `routes`.

pub mod alerts;
pub mod classifier;
pub mod ingest;

pub use alerts::{evaluate, AlertDraft};
pub use classifier::{classify, DisplayStatus};
pub use ingest::{ingest, IngestOutcome, TelemetryReport};
