//! Declarations of every metric family the exporter can emit

/// Name, help string, and label names of one metric family.
///
/// All families are counters. Label order here is the exposition order.
#[derive(Debug, Clone, Copy)]
pub struct FamilySpec {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

pub const FAMILIES: &[FamilySpec] = &[
    // Per-player statistics
    FamilySpec {
        name: "blocks_mined",
        help: "Blocks a player mined",
        labels: &["player", "block"],
    },
    FamilySpec {
        name: "blocks_picked_up",
        help: "Blocks a player picked up",
        labels: &["player", "block"],
    },
    FamilySpec {
        name: "blocks_crafted",
        help: "Items a player crafted",
        labels: &["player", "block"],
    },
    FamilySpec {
        name: "player_deaths",
        help: "How often a player died",
        labels: &["player", "cause"],
    },
    FamilySpec {
        name: "entities_killed",
        help: "Entities killed by a player",
        labels: &["player", "entity"],
    },
    FamilySpec {
        name: "cm_traveled",
        help: "Centimeters a player traveled, by method",
        labels: &["player", "method"],
    },
    FamilySpec {
        name: "damage_taken",
        help: "Damage taken by a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "damage_dealt",
        help: "Damage dealt by a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_playtime",
        help: "Time in minutes a player was online",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_jumps",
        help: "How often a player has jumped",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_slept",
        help: "Times a player slept in a bed",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_used_crafting_table",
        help: "Times a player used a crafting table",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_xp_total",
        help: "Total XP a player has",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_current_level",
        help: "Current XP level of a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_score",
        help: "Score of a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_health",
        help: "Current health of a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_food_level",
        help: "Current food level of a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_advancements",
        help: "Number of completed advancements of a player",
        labels: &["player"],
    },
    FamilySpec {
        name: "player_quests_finished",
        help: "Number of quests a player has finished",
        labels: &["player"],
    },
    // Server-wide state
    FamilySpec {
        name: "dim_tps",
        help: "TPS of a dimension",
        labels: &["dimension_id", "dimension_name"],
    },
    FamilySpec {
        name: "dim_ticktime",
        help: "Time a tick took in a dimension",
        labels: &["dimension_id", "dimension_name"],
    },
    FamilySpec {
        name: "overall_tps",
        help: "Overall TPS",
        labels: &[],
    },
    FamilySpec {
        name: "overall_ticktime",
        help: "Overall tick time",
        labels: &[],
    },
    FamilySpec {
        name: "entities",
        help: "Type and count of active entities",
        labels: &["entity"],
    },
    FamilySpec {
        name: "player_online",
        help: "1 if the player is online",
        labels: &["player"],
    },
    FamilySpec {
        name: "dynmap_tile_render_statistics",
        help: "Tile render statistics reported by Dynmap",
        labels: &["type", "file"],
    },
    FamilySpec {
        name: "dynmap_chunk_loading_statistics_count",
        help: "Chunk loading statistics reported by Dynmap",
        labels: &["type"],
    },
    FamilySpec {
        name: "dynmap_chunk_loading_statistics_duration",
        help: "Chunk loading duration reported by Dynmap",
        labels: &["type"],
    },
];

/// Look up a family declaration by name
pub fn family(name: &str) -> Option<&'static FamilySpec> {
    FAMILIES.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_names_are_unique() {
        for (i, spec) in FAMILIES.iter().enumerate() {
            assert!(
                FAMILIES.iter().skip(i + 1).all(|s| s.name != spec.name),
                "duplicate family {}",
                spec.name
            );
        }
    }

    #[test]
    fn test_family_lookup() {
        let spec = family("cm_traveled").unwrap();
        assert_eq!(spec.labels, &["player", "method"]);
        assert!(family("unknown_family").is_none());
    }
}
