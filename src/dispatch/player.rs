//! Category-to-metric dispatch for per-player records

use crate::types::{PlayerRecord, Sample};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How the elements of one stat category map to samples
#[derive(Clone, Copy)]
enum CategoryRule {
    /// One sample per element into `family`, with the element key as the
    /// value of `label`
    Labeled {
        family: &'static str,
        label: &'static str,
    },
    /// Elements are looked up individually in [`CUSTOM_ELEMENTS`]
    Custom,
}

static CATEGORIES: Lazy<HashMap<&'static str, CategoryRule>> = Lazy::new(|| {
    HashMap::from([
        (
            "minecraft:killed_by",
            CategoryRule::Labeled {
                family: "player_deaths",
                label: "cause",
            },
        ),
        ("minecraft:custom", CategoryRule::Custom),
        (
            "minecraft:mined",
            CategoryRule::Labeled {
                family: "blocks_mined",
                label: "block",
            },
        ),
        (
            "minecraft:killed",
            CategoryRule::Labeled {
                family: "entities_killed",
                label: "entity",
            },
        ),
        (
            "minecraft:picked_up",
            CategoryRule::Labeled {
                family: "blocks_picked_up",
                label: "block",
            },
        ),
        (
            "minecraft:crafted",
            CategoryRule::Labeled {
                family: "blocks_crafted",
                label: "block",
            },
        ),
    ])
});

/// How one `minecraft:custom` element maps to a sample
#[derive(Clone, Copy)]
enum CustomRule {
    /// One-to-one into a player-labeled family
    Metric(&'static str),
    /// Folds into `cm_traveled` with this method label
    Travel(&'static str),
}

static CUSTOM_ELEMENTS: Lazy<HashMap<&'static str, CustomRule>> = Lazy::new(|| {
    HashMap::from([
        ("minecraft:damage_taken", CustomRule::Metric("damage_taken")),
        ("minecraft:damage_dealt", CustomRule::Metric("damage_dealt")),
        (
            "minecraft:play_one_minute",
            CustomRule::Metric("player_playtime"),
        ),
        ("minecraft:jump", CustomRule::Metric("player_jumps")),
        ("minecraft:sleep_in_bed", CustomRule::Metric("player_slept")),
        (
            "minecraft:interact_with_crafting_table",
            CustomRule::Metric("player_used_crafting_table"),
        ),
        ("minecraft:crouch_one_cm", CustomRule::Travel("crouching")),
        ("minecraft:walk_one_cm", CustomRule::Travel("walking")),
        ("minecraft:sprint_one_cm", CustomRule::Travel("sprinting")),
        (
            "minecraft:walk_on_water_one_cm",
            CustomRule::Travel("frost_walker"),
        ),
        ("minecraft:fall_one_cm", CustomRule::Travel("falling")),
        ("minecraft:fly_one_cm", CustomRule::Travel("flying")),
    ])
});

/// Flatten one player record into labeled samples.
///
/// Unknown categories and unknown custom elements are dropped, keeping the
/// table forward-compatible with stat keys added by newer server versions.
/// Missing data emits nothing rather than a zero-valued sample.
pub fn dispatch_player(name: &str, record: &PlayerRecord) -> Vec<Sample> {
    let mut samples = Vec::new();

    for (category, elements) in &record.categories {
        let Some(rule) = CATEGORIES.get(category.as_str()).copied() else {
            continue;
        };
        for (element, value) in elements {
            match rule {
                CategoryRule::Labeled { family, label } => samples.push(Sample::new(
                    family,
                    *value as f64,
                    vec![("player", name.to_string()), (label, element.clone())],
                )),
                CategoryRule::Custom => match CUSTOM_ELEMENTS.get(element.as_str()).copied() {
                    Some(CustomRule::Metric(family)) => samples.push(Sample::new(
                        family,
                        *value as f64,
                        vec![("player", name.to_string())],
                    )),
                    Some(CustomRule::Travel(method)) => samples.push(Sample::new(
                        "cm_traveled",
                        *value as f64,
                        vec![("player", name.to_string()), ("method", method.to_string())],
                    )),
                    None => {}
                },
            }
        }
    }

    let derived = &record.derived;
    let scalar = |family, value| Sample::new(family, value, vec![("player", name.to_string())]);
    samples.push(scalar("player_xp_total", derived.xp_total as f64));
    samples.push(scalar("player_current_level", derived.xp_level as f64));
    samples.push(scalar("player_score", derived.score as f64));
    samples.push(scalar("player_health", derived.health));
    samples.push(scalar("player_food_level", derived.food_level as f64));
    samples.push(scalar("player_advancements", derived.advancements as f64));
    if let Some(quests) = derived.quests_finished {
        samples.push(scalar("player_quests_finished", quests as f64));
    }

    samples
}
