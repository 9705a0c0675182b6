//! Save/load — a versioned, full-state JSON snapshot.
//!
//! One snapshot captures everything: calendar, plots and crops, player,
//! stats, tick counter, and farm geometry. Loading is all-or-nothing: the
//! caller's world is replaced only when every check passes. Snapshots are
//! only valid between ticks with an empty pending-event queue; saving with
//! events in flight is rejected rather than silently dropping them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::calendar::Calendar;
use crate::events::EventQueue;
use crate::shared::{CropId, CropRegistry, PlayerState, PlayerStats, Plot, PlotId};
use crate::world::World;

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The payload is not a well-formed snapshot.
    #[error("corrupt save: {0}")]
    CorruptSave(String),
    /// A crop key in the snapshot is not in the registry.
    #[error("save references unknown crop type '{0}'")]
    UnknownCropType(CropId),
    /// The version tag is missing or not one this build reads.
    #[error("save version {found:?} is not supported (expected {expected})")]
    VersionMismatch { found: Option<u64>, expected: u32 },
    /// The pending-event queue must drain before a snapshot is taken.
    #[error("cannot save with pending events in flight")]
    PendingEvents,
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode save: {0}")]
    Encode(serde_json::Error),
}

/// On-disk layout. `plots` is a list rather than a map because JSON object
/// keys must be strings and `PlotId` is a coordinate pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    calendar: Calendar,
    plots: Vec<(PlotId, Plot)>,
    player: PlayerState,
    stats: PlayerStats,
    tick: u64,
    farm_size: u8,
    unlocked_area: u8,
}

/// Serialize the world to a JSON snapshot string.
pub fn save_world(world: &World) -> Result<String, SaveError> {
    if !world.events.is_empty() {
        return Err(SaveError::PendingEvents);
    }

    let file = SaveFile {
        version: SAVE_VERSION,
        calendar: world.calendar.clone(),
        plots: world.plots.iter().map(|(id, p)| (*id, p.clone())).collect(),
        player: world.player.clone(),
        stats: world.stats.clone(),
        tick: world.tick,
        farm_size: world.farm_size,
        unlocked_area: world.unlocked_area,
    };

    serde_json::to_string_pretty(&file).map_err(SaveError::Encode)
}

/// Parse a snapshot back into a world. Rejects (never coerces) wrong
/// versions, malformed payloads, and crop keys the registry does not know.
pub fn load_world(data: &str, registry: &CropRegistry) -> Result<World, SaveError> {
    // Version gate first, on the raw JSON, so a future layout with a new tag
    // fails as a version mismatch rather than as corruption.
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| SaveError::CorruptSave(e.to_string()))?;
    let found = value.get("version").and_then(|v| v.as_u64());
    if found != Some(SAVE_VERSION as u64) {
        return Err(SaveError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let file: SaveFile =
        serde_json::from_value(value).map_err(|e| SaveError::CorruptSave(e.to_string()))?;

    validate_crop_keys(&file, registry)?;

    let world = World {
        calendar: file.calendar,
        plots: file.plots.into_iter().collect(),
        player: file.player,
        stats: file.stats,
        events: EventQueue::default(),
        tick: file.tick,
        farm_size: file.farm_size,
        unlocked_area: file.unlocked_area,
    };

    info!(
        "[Save] Loaded snapshot: day {}, {} coins",
        world.calendar.day, world.player.coins
    );
    Ok(world)
}

fn validate_crop_keys(file: &SaveFile, registry: &CropRegistry) -> Result<(), SaveError> {
    let planted = file
        .plots
        .iter()
        .filter_map(|(_, plot)| plot.crop.as_ref())
        .map(|crop| &crop.crop_id);
    let keys = planted
        .chain(file.player.seeds.keys())
        .chain(file.player.goods.keys())
        .chain(file.player.unlocked_crops.iter());

    for id in keys {
        if !registry.contains(id) {
            return Err(SaveError::UnknownCropType(id.clone()));
        }
    }
    Ok(())
}

/// Write a snapshot to disk, temp file first then rename so a crash mid-write
/// never clobbers the previous save.
pub fn save_to_file(world: &World, path: &Path) -> Result<(), SaveError> {
    let json = save_world(world)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)?;
    fs::rename(&tmp_path, path)?;

    info!("[Save] Wrote snapshot to {}", path.display());
    Ok(())
}

pub fn load_from_file(path: &Path, registry: &CropRegistry) -> Result<World, SaveError> {
    let json = fs::read_to_string(path)?;
    load_world(&json, registry)
}
