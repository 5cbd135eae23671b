//! Per-player advancement JSON source

use crate::error::{ExporterError, Result, SourceKind};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Non-advancement metadata key present in every advancement file
const RESERVED_KEY: &str = "DataVersion";

/// Count the advancements a player has completed
pub fn read_advancements(path: &Path, player: &str) -> Result<u64> {
    let contents = fs::read_to_string(path).map_err(|e| ExporterError::SourceRead {
        source_kind: SourceKind::Advancements,
        player: player.to_string(),
        message: e.to_string(),
    })?;
    let doc: HashMap<String, Value> =
        serde_json::from_str(&contents).map_err(|e| format_error(player, e.to_string()))?;

    let mut count = 0;
    for (key, value) in &doc {
        if key == RESERVED_KEY {
            continue;
        }
        let done = value
            .get("done")
            .and_then(Value::as_bool)
            .ok_or_else(|| format_error(player, format!("advancement {} has no done flag", key)))?;
        if done {
            count += 1;
        }
    }
    Ok(count)
}

fn format_error(player: &str, message: String) -> ExporterError {
    ExporterError::SourceFormat {
        source_kind: SourceKind::Advancements,
        player: player.to_string(),
        message,
    }
}
