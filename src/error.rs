//! Error types for the exporter
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Which per-player data source an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Stats,
    PlayerData,
    Advancements,
    QuestProgress,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Stats => write!(f, "stats"),
            SourceKind::PlayerData => write!(f, "playerdata"),
            SourceKind::Advancements => write!(f, "advancements"),
            SourceKind::QuestProgress => write!(f, "quest progress"),
        }
    }
}

/// Custom error types for specific collection scenarios
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    #[error("Failed to read {source_kind} source for {player}: {message}")]
    SourceRead {
        source_kind: SourceKind,
        player: String,
        message: String,
    },

    #[error("Unexpected {source_kind} structure for {player}: {message}")]
    SourceFormat {
        source_kind: SourceKind,
        player: String,
        message: String,
    },

    #[error("Name resolution failed for {player}: {message}")]
    Resolution { player: String, message: String },

    #[error("RCON connection failed: {message}")]
    Connection { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}
