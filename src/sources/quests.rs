//! Shared quest-progress source
//!
//! One JSON document for the whole deployment, nesting quest -> task ->
//! completion-user lists. The key suffixes (`:9`, `:10`) are type markers
//! written by the quest add-on's own serializer.

use crate::error::{ExporterError, Result, SourceKind};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Count how many quests list the given player identifier as a completer
pub fn read_quests_finished(path: &Path, player: &str) -> Result<u64> {
    let contents = fs::read_to_string(path).map_err(|e| ExporterError::SourceRead {
        source_kind: SourceKind::QuestProgress,
        player: player.to_string(),
        message: e.to_string(),
    })?;
    let doc: Value =
        serde_json::from_str(&contents).map_err(|e| format_error(player, e.to_string()))?;

    let progress = doc
        .get("questProgress:9")
        .and_then(Value::as_object)
        .ok_or_else(|| format_error(player, "missing questProgress:9 map".to_string()))?;

    let mut count = 0;
    for quest in progress.values() {
        let users = quest
            .get("tasks:9")
            .and_then(|t| t.get("0:10"))
            .and_then(|t| t.get("completeUsers:9"))
            .and_then(Value::as_object)
            .ok_or_else(|| format_error(player, "missing task completion list".to_string()))?;
        for user in users.values() {
            if user.as_str() == Some(player) {
                count += 1;
            }
        }
    }
    Ok(count)
}

fn format_error(player: &str, message: String) -> ExporterError {
    ExporterError::SourceFormat {
        source_kind: SourceKind::QuestProgress,
        player: player.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUEST_DOC: &str = r#"{
        "questProgress:9": {
            "0:10": {
                "tasks:9": {"0:10": {"completeUsers:9": {
                    "0:8": "069a79f4-44e9-4726-a5be-fca90e38aaf5",
                    "1:8": "853c80ef-3c37-49fd-aa49-938b674adae6"
                }}}
            },
            "1:10": {
                "tasks:9": {"0:10": {"completeUsers:9": {
                    "0:8": "069a79f4-44e9-4726-a5be-fca90e38aaf5"
                }}}
            }
        }
    }"#;

    #[test]
    fn test_counts_completions_for_player() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QuestProgress.json");
        fs::write(&path, QUEST_DOC).unwrap();

        assert_eq!(
            read_quests_finished(&path, "069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap(),
            2
        );
        assert_eq!(
            read_quests_finished(&path, "853c80ef-3c37-49fd-aa49-938b674adae6").unwrap(),
            1
        );
        assert_eq!(read_quests_finished(&path, "nobody").unwrap(), 0);
    }

    #[test]
    fn test_missing_progress_map_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QuestProgress.json");
        fs::write(&path, r#"{"something":"else"}"#).unwrap();

        let err = read_quests_finished(&path, "p").unwrap_err();
        assert!(err.to_string().contains("questProgress"));
    }
}
