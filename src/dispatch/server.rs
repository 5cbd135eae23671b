//! Dispatch of parsed server records into labeled samples

use crate::types::{Sample, ServerRecord};

/// Convert parsed server records into samples, one family per record kind.
///
/// Dimension timings and chunk-load statistics each fan out into two
/// families; tile-render statistics fan out into one sub-sample per counter.
pub fn dispatch_server(records: &[ServerRecord]) -> Vec<Sample> {
    let mut samples = Vec::new();
    for record in records {
        match record {
            ServerRecord::DimensionTiming {
                id,
                name,
                mean_tick_ms,
                mean_tps,
            } => {
                let labels = vec![
                    ("dimension_id", id.to_string()),
                    ("dimension_name", name.clone()),
                ];
                samples.push(Sample::new("dim_tps", *mean_tps, labels.clone()));
                samples.push(Sample::new("dim_ticktime", *mean_tick_ms, labels));
            }
            ServerRecord::OverallTiming {
                mean_tick_ms,
                mean_tps,
            } => {
                samples.push(Sample::new("overall_tps", *mean_tps, Vec::new()));
                samples.push(Sample::new("overall_ticktime", *mean_tick_ms, Vec::new()));
            }
            ServerRecord::EntityCount { kind, count } => {
                samples.push(Sample::new(
                    "entities",
                    *count as f64,
                    vec![("entity", kind.clone())],
                ));
            }
            ServerRecord::OnlinePlayer { name } => {
                samples.push(Sample::new(
                    "player_online",
                    1.0,
                    vec![("player", name.clone())],
                ));
            }
            ServerRecord::TileRenderStat {
                region,
                processed,
                rendered,
                updated,
            } => {
                for (kind, value) in [
                    ("processed", *processed),
                    ("rendered", *rendered),
                    ("updated", *updated),
                ] {
                    samples.push(Sample::new(
                        "dynmap_tile_render_statistics",
                        value as f64,
                        vec![("type", kind.to_string()), ("file", region.clone())],
                    ));
                }
            }
            ServerRecord::ChunkLoadStat {
                state,
                count,
                duration_per_chunk,
            } => {
                samples.push(Sample::new(
                    "dynmap_chunk_loading_statistics_count",
                    *count as f64,
                    vec![("type", state.clone())],
                ));
                samples.push(Sample::new(
                    "dynmap_chunk_loading_statistics_duration",
                    *duration_per_chunk,
                    vec![("type", state.clone())],
                ));
            }
        }
    }
    samples
}
