//! Merging loader for the per-player sources

use crate::config::WorldSettings;
use crate::error::Result;
use crate::sources::{advancements, playerdata, quests, stats};
use crate::types::{DerivedStats, PlayerId, PlayerRecord};
use anyhow::Context;
use std::fs;
use tracing::info;

const QUEST_PROGRESS_FILE: &str = "QuestProgress.json";

/// Reads and merges the per-player sources into one record per player
pub struct PlayerRecordLoader {
    world: WorldSettings,
    quests_enabled: bool,
}

impl PlayerRecordLoader {
    /// Quest tracking is toggled for the whole deployment by the presence of
    /// the quest directory at startup.
    pub fn new(world: WorldSettings) -> Self {
        let quests_enabled = world.betterquesting_dir.is_dir();
        if quests_enabled {
            info!("quest tracking enabled");
        }
        Self {
            world,
            quests_enabled,
        }
    }

    pub fn quests_enabled(&self) -> bool {
        self.quests_enabled
    }

    /// Enumerate player identifiers from the stats directory listing
    pub fn discover_players(&self) -> Result<Vec<PlayerId>> {
        let entries = fs::read_dir(&self.world.stats_dir).with_context(|| {
            format!(
                "Failed to list stats directory {}",
                self.world.stats_dir.display()
            )
        })?;

        let mut players = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                players.push(stem.to_string());
            }
        }
        Ok(players)
    }

    /// Load and merge all sources for one player.
    ///
    /// Any unreadable or malformed mandatory source fails the whole record;
    /// there is no partial recovery.
    pub fn load(&self, id: &str) -> Result<PlayerRecord> {
        let categories = stats::read_stats(&self.world.stats_dir.join(format!("{id}.json")), id)?;
        let state = playerdata::read_playerdata(
            &self.world.playerdata_dir.join(format!("{id}.dat")),
            id,
        )?;
        let advancements =
            advancements::read_advancements(&self.world.advancements_dir.join(format!("{id}.json")), id)?;
        let quests_finished = if self.quests_enabled {
            Some(quests::read_quests_finished(
                &self.world.betterquesting_dir.join(QUEST_PROGRESS_FILE),
                id,
            )?)
        } else {
            None
        };

        Ok(PlayerRecord {
            categories,
            derived: DerivedStats {
                xp_total: state.xp_total,
                xp_level: state.xp_level,
                score: state.score,
                health: state.health,
                food_level: state.food_level,
                advancements,
                quests_finished,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbt::{Blob, Value};
    use std::fs::File;
    use std::path::Path;

    fn write_world(root: &Path, id: &str) {
        fs::create_dir_all(root.join("stats")).unwrap();
        fs::create_dir_all(root.join("playerdata")).unwrap();
        fs::create_dir_all(root.join("advancements")).unwrap();

        fs::write(
            root.join("stats").join(format!("{id}.json")),
            r#"{"stats":{"minecraft:custom":{"minecraft:jump":42}}}"#,
        )
        .unwrap();

        let mut blob = Blob::new();
        blob.insert("XpTotal", Value::Int(100)).unwrap();
        blob.insert("XpLevel", Value::Int(7)).unwrap();
        blob.insert("Score", Value::Int(100)).unwrap();
        blob.insert("Health", Value::Float(20.0)).unwrap();
        blob.insert("foodLevel", Value::Int(18)).unwrap();
        let mut file = File::create(root.join("playerdata").join(format!("{id}.dat"))).unwrap();
        blob.to_gzip_writer(&mut file).unwrap();

        fs::write(
            root.join("advancements").join(format!("{id}.json")),
            r#"{"minecraft:story/mine_stone":{"done":true},"DataVersion":3465}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_merges_all_sources() {
        let dir = tempfile::tempdir().unwrap();
        let id = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
        write_world(dir.path(), id);

        let loader = PlayerRecordLoader::new(WorldSettings::from_root(dir.path()));
        assert!(!loader.quests_enabled());

        let record = loader.load(id).unwrap();
        assert_eq!(record.categories["minecraft:custom"]["minecraft:jump"], 42);
        assert_eq!(record.derived.xp_total, 100);
        assert_eq!(record.derived.xp_level, 7);
        assert_eq!(record.derived.advancements, 1);
        assert_eq!(record.derived.quests_finished, None);
    }

    #[test]
    fn test_quest_count_merged_when_directory_exists() {
        let dir = tempfile::tempdir().unwrap();
        let id = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
        write_world(dir.path(), id);
        fs::create_dir_all(dir.path().join("betterquesting")).unwrap();
        fs::write(
            dir.path().join("betterquesting").join(QUEST_PROGRESS_FILE),
            format!(
                r#"{{"questProgress:9":{{"0:10":{{"tasks:9":{{"0:10":{{"completeUsers:9":{{"0:8":"{id}"}}}}}}}}}}}}"#
            ),
        )
        .unwrap();

        let loader = PlayerRecordLoader::new(WorldSettings::from_root(dir.path()));
        assert!(loader.quests_enabled());

        let record = loader.load(id).unwrap();
        assert_eq!(record.derived.quests_finished, Some(1));
    }

    #[test]
    fn test_discover_players_lists_stats_filenames() {
        let dir = tempfile::tempdir().unwrap();
        write_world(dir.path(), "one");
        write_world(dir.path(), "two");
        fs::write(dir.path().join("stats").join("notes.txt"), "ignored").unwrap();

        let loader = PlayerRecordLoader::new(WorldSettings::from_root(dir.path()));
        let mut players = loader.discover_players().unwrap();
        players.sort();
        assert_eq!(players, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_missing_playerdata_fails_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let id = "no-dat";
        write_world(dir.path(), id);
        fs::remove_file(dir.path().join("playerdata").join(format!("{id}.dat"))).unwrap();

        let loader = PlayerRecordLoader::new(WorldSettings::from_root(dir.path()));
        assert!(loader.load(id).is_err());
    }
}
