//! Progression system — static unlock predicates over lifetime stats.
//!
//! Responsible for:
//! - The static table of unlock definitions (crops and farm expansions)
//! - Pure, idempotent evaluation of that table against `PlayerStats`
//! - Monotonic application: unlocks are never revoked
//!
//! The scheduler re-evaluates at the end of every day-advance.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::shared::{CropId, PlayerState, PlayerStats, Plot, PlotId};

/// What satisfying an unlock condition grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockTarget {
    /// A crop species becomes plantable and purchasable.
    Crop(CropId),
    /// The unlocked farm square grows to `size` x `size`.
    FarmArea(u8),
}

/// Predicate over lifetime stats. All bounds must hold; zero bounds are
/// trivially satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockCondition {
    pub min_harvests: u32,
    pub min_coins_earned: u32,
    pub min_days: u32,
    /// Per-species harvest minimums.
    pub required_crops: Vec<(CropId, u32)>,
}

impl UnlockCondition {
    pub fn is_met(&self, stats: &PlayerStats) -> bool {
        stats.total_harvests >= self.min_harvests
            && stats.total_coins_earned >= self.min_coins_earned
            && stats.days_played >= self.min_days
            && self
                .required_crops
                .iter()
                .all(|(id, n)| stats.harvests_of(id) >= *n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockDef {
    /// Stable key, used to report which unlocks fired.
    pub id: &'static str,
    pub target: UnlockTarget,
    pub condition: UnlockCondition,
}

/// The full progression table. Built once per world; order is the order
/// unlocks are announced in when several fire on the same day.
pub fn unlock_table() -> Vec<UnlockDef> {
    vec![
        UnlockDef {
            id: "crop_carrot",
            target: UnlockTarget::Crop("carrot".into()),
            condition: UnlockCondition {
                min_harvests: 5,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "crop_tomato",
            target: UnlockTarget::Crop("tomato".into()),
            condition: UnlockCondition {
                min_harvests: 15,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "crop_corn",
            target: UnlockTarget::Crop("corn".into()),
            condition: UnlockCondition {
                min_coins_earned: 100,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "area_6",
            target: UnlockTarget::FarmArea(6),
            condition: UnlockCondition {
                min_harvests: 10,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "area_7",
            target: UnlockTarget::FarmArea(7),
            condition: UnlockCondition {
                min_coins_earned: 60,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "area_8",
            target: UnlockTarget::FarmArea(8),
            condition: UnlockCondition {
                min_harvests: 25,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "area_9",
            target: UnlockTarget::FarmArea(9),
            condition: UnlockCondition {
                min_coins_earned: 150,
                ..UnlockCondition::default()
            },
        },
        UnlockDef {
            id: "area_10",
            target: UnlockTarget::FarmArea(10),
            condition: UnlockCondition {
                min_harvests: 50,
                ..UnlockCondition::default()
            },
        },
    ]
}

/// Pure evaluation: the ids of every table entry whose condition the stats
/// satisfy. Deterministic and idempotent; never consults current unlocks.
pub fn evaluate(stats: &PlayerStats) -> BTreeSet<&'static str> {
    unlock_table()
        .iter()
        .filter(|def| def.condition.is_met(stats))
        .map(|def| def.id)
        .collect()
}

/// Merge everything the stats now satisfy into the player and farm.
/// Monotonic: only adds crops and only grows the unlocked area. Returns the
/// defs that newly fired this call, in table order.
pub fn apply_unlocks(
    player: &mut PlayerState,
    stats: &PlayerStats,
    plots: &mut BTreeMap<PlotId, Plot>,
    unlocked_area: &mut u8,
) -> Vec<UnlockDef> {
    let mut fired = Vec::new();

    for def in unlock_table() {
        if !def.condition.is_met(stats) {
            continue;
        }
        match &def.target {
            UnlockTarget::Crop(id) => {
                if player.unlocked_crops.insert(id.clone()) {
                    info!("[Unlocks] New crop unlocked: {}", id);
                    fired.push(def);
                }
            }
            UnlockTarget::FarmArea(size) => {
                if *size > *unlocked_area {
                    *unlocked_area = *size;
                    expand_farm(plots, *size);
                    info!("[Unlocks] Farm expanded to {0}x{0}", size);
                    fired.push(def);
                }
            }
        }
    }

    fired
}

fn expand_farm(plots: &mut BTreeMap<PlotId, Plot>, size: u8) {
    let size = size as i32;
    for (id, plot) in plots.iter_mut() {
        if id.x < size && id.y < size {
            plot.unlocked = true;
        }
    }
}
