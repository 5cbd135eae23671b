//! Common types used throughout the exporter

use std::collections::HashMap;

/// Opaque player identifier, derived from a stats filename (dashed UUID form)
pub type PlayerId = String;

/// Resolved in-game display name of a player
pub type DisplayName = String;

/// Scalar attributes merged from the binary player state and the
/// advancement/quest sources
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedStats {
    pub xp_total: i64,
    pub xp_level: i64,
    pub score: i64,
    pub health: f64,
    pub food_level: i64,
    pub advancements: u64,
    /// Present only when quest tracking is enabled for the deployment
    pub quests_finished: Option<u64>,
}

/// The merged attribute map for one player, built fresh each collection pass
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    /// Category name -> element key -> counter
    pub categories: HashMap<String, HashMap<String, u64>>,
    pub derived: DerivedStats,
}

/// One structured record extracted from a raw RCON response
#[derive(Debug, Clone, PartialEq)]
pub enum ServerRecord {
    DimensionTiming {
        id: i64,
        name: String,
        mean_tick_ms: f64,
        mean_tps: f64,
    },
    OverallTiming {
        mean_tick_ms: f64,
        mean_tps: f64,
    },
    EntityCount {
        kind: String,
        count: u64,
    },
    OnlinePlayer {
        name: String,
    },
    TileRenderStat {
        region: String,
        processed: u64,
        rendered: u64,
        updated: u64,
    },
    ChunkLoadStat {
        state: String,
        count: u64,
        duration_per_chunk: f64,
    },
}

/// One labeled counter sample, the terminal output unit of a collection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Metric family name; families are declared in [`crate::dispatch::families`]
    pub family: &'static str,
    pub value: f64,
    /// Label key/value pairs, keys matching the family declaration
    pub labels: Vec<(&'static str, String)>,
}

impl Sample {
    pub fn new(family: &'static str, value: f64, labels: Vec<(&'static str, String)>) -> Self {
        Self {
            family,
            value,
            labels,
        }
    }

    /// Look up a label value by key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
