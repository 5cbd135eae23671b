//! Per-player statistics JSON source

use crate::error::{ExporterError, Result, SourceKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk layout of a `<uuid>.json` stats file
#[derive(Debug, Deserialize)]
struct StatsFile {
    /// Category name -> element key -> counter
    stats: HashMap<String, HashMap<String, u64>>,
}

/// Read the category/element counter mapping for one player
pub fn read_stats(path: &Path, player: &str) -> Result<HashMap<String, HashMap<String, u64>>> {
    let contents = fs::read_to_string(path).map_err(|e| ExporterError::SourceRead {
        source_kind: SourceKind::Stats,
        player: player.to_string(),
        message: e.to_string(),
    })?;
    let parsed: StatsFile =
        serde_json::from_str(&contents).map_err(|e| ExporterError::SourceFormat {
            source_kind: SourceKind::Stats,
            player: player.to_string(),
            message: e.to_string(),
        })?;
    Ok(parsed.stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        fs::write(
            &path,
            r#"{"stats":{"minecraft:custom":{"minecraft:jump":42}},"DataVersion":3465}"#,
        )
        .unwrap();

        let stats = read_stats(&path, "p").unwrap();
        assert_eq!(stats["minecraft:custom"]["minecraft:jump"], 42);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = read_stats(Path::new("/nonexistent/p.json"), "p").unwrap_err();
        assert!(err.to_string().contains("read stats"));
    }

    #[test]
    fn test_missing_stats_key_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, r#"{"DataVersion":3465}"#).unwrap();

        let err = read_stats(&path, "p").unwrap_err();
        assert!(err.to_string().contains("structure"));
    }
}
