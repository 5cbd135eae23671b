//! Collection orchestration and metrics exposition
//!
//! One collection pass runs to completion inside each scrape request; the
//! exposition server and the daily cache flush serialize on the shared
//! collector lock.

pub mod exposition;
pub mod orchestrator;

pub use exposition::{encode_samples, MetricsServer};
pub use orchestrator::Collector;
