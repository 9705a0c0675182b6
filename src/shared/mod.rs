//! Shared types for the Furrowfield simulation core.
//!
//! This is the type contract. Every domain module imports from here.
//! No domain imports from any other domain directly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// SEASONS & WEATHER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Stormy,
    Snowy, // Winter only
}

impl Weather {
    /// Rain and storms both count as rain for crop-watering purposes.
    pub fn is_rainy(self) -> bool {
        matches!(self, Weather::Rainy | Weather::Stormy)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every crop species.
/// Using string IDs for data-driven flexibility.
pub type CropId = String;

/// Ordered growth lifecycle of a crop.
///
/// `Seed → Sprouting → Growing → Mature` under daily watering; `Dead` is the
/// terminal drought/out-of-season state. `Mature` is terminal for growth but
/// the crop stays harvestable until removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Seed,
    Sprouting,
    Growing,
    Mature,
    Dead,
}

impl GrowthStage {
    /// The stage reached after completing this one. Mature and Dead are
    /// terminal.
    pub fn next(self) -> Self {
        match self {
            GrowthStage::Seed => GrowthStage::Sprouting,
            GrowthStage::Sprouting => GrowthStage::Growing,
            GrowthStage::Growing => GrowthStage::Mature,
            GrowthStage::Mature => GrowthStage::Mature,
            GrowthStage::Dead => GrowthStage::Dead,
        }
    }

    /// Index into `CropDef::stage_days` for pre-mature stages.
    pub fn stage_index(self) -> Option<usize> {
        match self {
            GrowthStage::Seed => Some(0),
            GrowthStage::Sprouting => Some(1),
            GrowthStage::Growing => Some(2),
            GrowthStage::Mature | GrowthStage::Dead => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GrowthStage::Mature | GrowthStage::Dead)
    }
}

/// Static per-species parameters. Immutable — loaded once into the
/// `CropRegistry` and shared by reference across all crop instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub id: CropId,
    pub name: String,
    /// Days to spend in each pre-mature stage (Seed, Sprouting, Growing).
    pub stage_days: Vec<u16>,
    /// Consecutive unwatered days the crop survives. One more kills it.
    pub drought_tolerance: u16,
    pub seed_cost: u32,
    pub sell_price: u32,
    /// Seasons the crop can be planted in and survive. Empty = any season.
    pub seasons: Vec<Season>,
    /// Whether the species is available from day one (others come from the
    /// unlock system).
    pub starts_unlocked: bool,
}

impl CropDef {
    /// Total watered days from planting to maturity.
    pub fn days_to_mature(&self) -> u32 {
        self.stage_days.iter().map(|&d| d as u32).sum()
    }

    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }
}

/// Read-only lookup of crop definitions, keyed by species id.
#[derive(Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: BTreeMap<CropId, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, id: &str) -> Option<&CropDef> {
        self.crops.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.crops.contains_key(id)
    }
}

/// A crop instance growing on a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub crop_id: CropId,
    pub stage: GrowthStage,
    /// Watered days spent in the current stage.
    pub days_in_stage: u16,
    /// Consecutive unwatered days. Reset by watering.
    pub days_without_water: u16,
}

impl Crop {
    pub fn new(crop_id: impl Into<CropId>) -> Self {
        Self {
            crop_id: crop_id.into(),
            stage: GrowthStage::Seed,
            days_in_stage: 0,
            days_without_water: 0,
        }
    }

    pub fn is_mature(&self) -> bool {
        self.stage == GrowthStage::Mature
    }

    pub fn is_dead(&self) -> bool {
        self.stage == GrowthStage::Dead
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLOTS
// ═══════════════════════════════════════════════════════════════════════

/// Grid coordinate of a plot. Ordered so plot iteration is deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlotId {
    pub x: i32,
    pub y: i32,
}

impl PlotId {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single farm tile. Holds at most one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub crop: Option<Crop>,
    /// Watered-today flag. Consumed by the day-advance pipeline, then reset.
    pub watered: bool,
    /// Locked plots sit outside the current farm area and reject actions.
    pub unlocked: bool,
}

impl Plot {
    pub fn locked() -> Self {
        Self {
            crop: None,
            watered: false,
            unlocked: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            crop: None,
            watered: false,
            unlocked: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.crop.is_none()
    }

    pub fn has_mature_crop(&self) -> bool {
        self.crop.as_ref().is_some_and(Crop::is_mature)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

/// Player economy and content availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Coin balance. Unsigned: the type guarantees it never goes negative;
    /// purchases check funds before deducting.
    pub coins: u32,
    /// Seed inventory per species.
    pub seeds: BTreeMap<CropId, u32>,
    /// Harvested goods awaiting sale, per species.
    pub goods: BTreeMap<CropId, u32>,
    /// Unlocked crop species. Monotonic — entries are never removed.
    pub unlocked_crops: BTreeSet<CropId>,
    /// Species the next plant action uses.
    pub selected_crop: CropId,
}

impl Default for PlayerState {
    fn default() -> Self {
        let mut seeds = BTreeMap::new();
        seeds.insert("wheat".to_string(), STARTING_WHEAT_SEEDS);

        let mut unlocked_crops = BTreeSet::new();
        unlocked_crops.insert("wheat".to_string());

        Self {
            coins: STARTING_COINS,
            seeds,
            goods: BTreeMap::new(),
            unlocked_crops,
            selected_crop: "wheat".to_string(),
        }
    }
}

impl PlayerState {
    pub fn has_seeds(&self, crop_id: &str, count: u32) -> bool {
        self.seeds.get(crop_id).copied().unwrap_or(0) >= count
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.coins >= cost
    }

    pub fn goods_count(&self, crop_id: &str) -> u32 {
        self.goods.get(crop_id).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, crop_id: &str) -> bool {
        self.unlocked_crops.contains(crop_id)
    }
}

/// Lifetime progress counters. Drive the unlock predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_harvests: u32,
    pub total_coins_earned: u32,
    pub days_played: u32,
    pub crops_harvested: BTreeMap<CropId, u32>,
}

impl PlayerStats {
    pub fn harvests_of(&self, crop_id: &str) -> u32 {
        self.crops_harvested.get(crop_id).copied().unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// A player action the core rejected. The action is a no-op; world state is
/// unchanged. Surfaced to the input layer as the rejected-action signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no plot at ({0}, {1})")]
    InvalidPlot(i32, i32),
    #[error("plot is locked")]
    PlotLocked,
    #[error("plot already has a crop")]
    PlotOccupied,
    #[error("plot has no crop")]
    PlotEmpty,
    #[error("crop is not ready to harvest")]
    CropNotMature,
    #[error("crop is dead")]
    CropDead,
    #[error("crop already watered today")]
    AlreadyWatered,
    #[error("unknown crop type: {0}")]
    UnknownCropType(CropId),
    #[error("{0} is not unlocked yet")]
    CropLocked(CropId),
    #[error("{0} does not grow in {1:?}")]
    OutOfSeason(CropId, Season),
    #[error("no {0} seeds available")]
    NoSeeds(CropId),
    #[error("not enough goods: have {have}, need {need}")]
    NotEnoughGoods { have: u32, need: u32 },
    #[error("not enough coins: have {have}, need {need}")]
    InsufficientFunds { have: u32, need: u32 },
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u32 = 10;

pub const FARM_SIZE: u8 = 10;
pub const STARTING_UNLOCKED_AREA: u8 = 5;

pub const STARTING_COINS: u32 = 50;
pub const STARTING_WHEAT_SEEDS: u32 = 10;

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
