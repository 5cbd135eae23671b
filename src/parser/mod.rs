//! Pattern-based extraction of structured records from RCON responses
//!
//! The remote endpoint's output is produced by third-party, version-drifting
//! software, so extraction is best-effort: each function scans for known
//! phrase shapes and silently ignores anything that does not match. An empty
//! result is normal, never an error. Where server variants phrase the same
//! report differently, every known phrasing is tried.

use crate::types::ServerRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static DIM_TIMING: Lazy<Regex> = Lazy::new(|| {
    // Punctuation drifts between server versions: optional space before the
    // colon, optional period after "ms".
    Regex::new(r"Dim\s*(-?\d+)\s*\((.*?)\)\s*:\s*Mean tick time:\s*([\d.]+) ms\.?\s*Mean TPS:\s*([\d.]+)")
        .expect("valid dimension timing pattern")
});

static OVERALL_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Overall\s*:\s*Mean tick time:\s*([\d.]+) ms\.?\s*Mean TPS:\s*([\d.]+)")
        .expect("valid overall timing pattern")
});

static ENTITY_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+): ([A-Za-z0-9_.\-]+:[A-Za-z0-9_./\-]+)").expect("valid entity count pattern")
});

/// Known phrasings of the online-player listing across server variants
static PLAYER_LISTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"players online:(.*)").expect("valid player list pattern"),
        Regex::new(r"Connected players:(.*)").expect("valid player list pattern"),
    ]
});

static TILE_RENDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*([^\s:][^:\n]*): processed=(\d+), rendered=(\d+), updated=(\d+)")
        .expect("valid tile render pattern")
});

static CHUNK_LOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Chunks processed: (.*?): count=(\d+), ([\d.]+)")
        .expect("valid chunk load pattern")
});

/// Extract per-dimension and overall tick timings from a tick-timing report
pub fn parse_tick_report(response: &str) -> Vec<ServerRecord> {
    let mut records = Vec::new();
    for caps in DIM_TIMING.captures_iter(response) {
        let (Ok(id), Ok(mean_tick_ms), Ok(mean_tps)) = (
            caps[1].parse::<i64>(),
            caps[3].parse::<f64>(),
            caps[4].parse::<f64>(),
        ) else {
            continue;
        };
        records.push(ServerRecord::DimensionTiming {
            id,
            name: caps[2].to_string(),
            mean_tick_ms,
            mean_tps,
        });
    }
    for caps in OVERALL_TIMING.captures_iter(response) {
        let (Ok(mean_tick_ms), Ok(mean_tps)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>())
        else {
            continue;
        };
        records.push(ServerRecord::OverallTiming {
            mean_tick_ms,
            mean_tps,
        });
    }
    records
}

/// Extract entity kind/count pairs from an entity listing
pub fn parse_entity_list(response: &str) -> Vec<ServerRecord> {
    ENTITY_COUNT
        .captures_iter(response)
        .filter_map(|caps| {
            Some(ServerRecord::EntityCount {
                count: caps[1].parse().ok()?,
                kind: caps[2].to_string(),
            })
        })
        .collect()
}

/// Extract the online players from a player listing.
///
/// Blank or whitespace-only entries in the comma-separated list are dropped
/// and names are trimmed.
pub fn parse_player_list(response: &str) -> Vec<ServerRecord> {
    let Some(caps) = PLAYER_LISTS.iter().find_map(|re| re.captures(response)) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| ServerRecord::OnlinePlayer {
            name: name.to_string(),
        })
        .collect()
}

/// Extract tile-render and chunk-load statistics from a render-statistics report
pub fn parse_render_stats(response: &str) -> Vec<ServerRecord> {
    let mut records = Vec::new();
    for caps in TILE_RENDER.captures_iter(response) {
        let (Ok(processed), Ok(rendered), Ok(updated)) = (
            caps[2].parse::<u64>(),
            caps[3].parse::<u64>(),
            caps[4].parse::<u64>(),
        ) else {
            continue;
        };
        records.push(ServerRecord::TileRenderStat {
            region: caps[1].trim().to_string(),
            processed,
            rendered,
            updated,
        });
    }
    for caps in CHUNK_LOAD.captures_iter(response) {
        let (Ok(count), Ok(duration_per_chunk)) =
            (caps[2].parse::<u64>(), caps[3].parse::<f64>())
        else {
            continue;
        };
        records.push(ServerRecord::ChunkLoadStat {
            state: caps[1].to_string(),
            count,
            duration_per_chunk,
        });
    }
    records
}
