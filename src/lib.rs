//! Quarry Exporter - Prometheus exporter for Minecraft servers
//!
//! This crate harvests per-player world data and RCON server state and
//! normalizes both into labeled counter samples for pull-based scraping.

pub mod collector;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod identity;
pub mod parser;
pub mod rcon;
pub mod sources;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ExporterError, Result, SourceKind};
pub use types::*;

// Re-export key components
pub use collector::{Collector, MetricsServer};
pub use identity::{IdentityCache, MojangLookup, NameLookup};
pub use rcon::RconSession;
pub use sources::PlayerRecordLoader;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
