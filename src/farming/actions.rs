//! Player plot actions: plant, water, harvest, clear.
//!
//! Every entry point validates first and mutates only on success, so a
//! rejected action leaves the world untouched.

use std::collections::BTreeMap;

use tracing::info;

use crate::shared::{
    ActionError, Crop, CropRegistry, Plot, PlotId, PlayerState, PlayerStats, Season,
};

fn plot_mut<'a>(
    plots: &'a mut BTreeMap<PlotId, Plot>,
    id: PlotId,
) -> Result<&'a mut Plot, ActionError> {
    let plot = plots
        .get_mut(&id)
        .ok_or(ActionError::InvalidPlot(id.x, id.y))?;
    if !plot.unlocked {
        return Err(ActionError::PlotLocked);
    }
    Ok(plot)
}

/// Plant a seed of `crop_id` on an empty, unlocked plot. Consumes one seed.
pub fn plant_seed(
    plots: &mut BTreeMap<PlotId, Plot>,
    player: &mut PlayerState,
    registry: &CropRegistry,
    season: Season,
    plot_id: PlotId,
    crop_id: &str,
) -> Result<(), ActionError> {
    let def = registry
        .get(crop_id)
        .ok_or_else(|| ActionError::UnknownCropType(crop_id.to_string()))?;

    if !player.is_unlocked(crop_id) {
        return Err(ActionError::CropLocked(crop_id.to_string()));
    }
    if !def.grows_in(season) {
        return Err(ActionError::OutOfSeason(crop_id.to_string(), season));
    }
    if !player.has_seeds(crop_id, 1) {
        return Err(ActionError::NoSeeds(crop_id.to_string()));
    }

    let plot = plot_mut(plots, plot_id)?;
    if !plot.is_empty() {
        return Err(ActionError::PlotOccupied);
    }

    plot.crop = Some(Crop::new(crop_id));
    *player.seeds.entry(crop_id.to_string()).or_insert(0) -= 1;

    info!("[Farming] Planted {} at ({}, {})", def.name, plot_id.x, plot_id.y);
    Ok(())
}

/// Mark a plot as watered for today. Requires a living crop.
pub fn water_plot(
    plots: &mut BTreeMap<PlotId, Plot>,
    plot_id: PlotId,
) -> Result<(), ActionError> {
    let plot = plot_mut(plots, plot_id)?;

    let crop = plot.crop.as_ref().ok_or(ActionError::PlotEmpty)?;
    if crop.is_dead() {
        return Err(ActionError::CropDead);
    }
    if plot.watered {
        return Err(ActionError::AlreadyWatered);
    }

    plot.watered = true;
    Ok(())
}

/// Harvest a mature crop: the plot empties and one unit of the species'
/// goods lands in the player's inventory. Harvest stats drive unlocks.
///
/// Returns the harvested species id.
pub fn harvest(
    plots: &mut BTreeMap<PlotId, Plot>,
    player: &mut PlayerState,
    stats: &mut PlayerStats,
    registry: &CropRegistry,
    plot_id: PlotId,
) -> Result<String, ActionError> {
    let plot = plot_mut(plots, plot_id)?;

    let crop = plot.crop.as_ref().ok_or(ActionError::PlotEmpty)?;
    if crop.is_dead() {
        return Err(ActionError::CropDead);
    }
    if !crop.is_mature() {
        return Err(ActionError::CropNotMature);
    }

    let crop_id = crop.crop_id.clone();
    // Defs are loaded for every plantable species, but guard anyway.
    let def = registry
        .get(&crop_id)
        .ok_or_else(|| ActionError::UnknownCropType(crop_id.clone()))?;

    plot.crop = None;
    plot.watered = false;

    *player.goods.entry(crop_id.clone()).or_insert(0) += 1;
    stats.total_harvests += 1;
    *stats.crops_harvested.entry(crop_id.clone()).or_insert(0) += 1;

    info!(
        "[Farming] Harvested {} at ({}, {}) — {} total harvests",
        def.name, plot_id.x, plot_id.y, stats.total_harvests
    );
    Ok(crop_id)
}

/// Remove a dead crop, returning the plot to empty. A no-op error on
/// anything still alive — living crops are removed through harvest.
pub fn clear_plot(
    plots: &mut BTreeMap<PlotId, Plot>,
    plot_id: PlotId,
) -> Result<(), ActionError> {
    let plot = plot_mut(plots, plot_id)?;

    let crop = plot.crop.as_ref().ok_or(ActionError::PlotEmpty)?;
    if !crop.is_dead() {
        return Err(ActionError::CropNotMature);
    }

    plot.crop = None;
    plot.watered = false;
    Ok(())
}
