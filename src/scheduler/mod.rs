//! Day-advance pipeline.
//!
//! `advance_day` is the single entry point behind the "next day" action.
//! The step order is load-bearing:
//!
//! 1. run the growth engine on every planted plot with today's watered flag;
//! 2. reset every watered flag;
//! 3. advance the calendar, count the day, and queue rain for the new day;
//! 4. fire day-boundary pending events in FIFO order;
//! 5. re-evaluate unlocks against the day's final stats and queue a notice
//!    for each unlock that fired.
//!
//! Today's watering is consumed before it is cleared, and unlocks see the
//! day's final state. The pipeline is total: it never fails on well-formed
//! state.

use tracing::warn;

use crate::events::{EventEffect, Trigger};
use crate::farming::growth::advance_crop;
use crate::shared::CropRegistry;
use crate::unlocks::{apply_unlocks, UnlockTarget};
use crate::world::World;

pub fn advance_day(world: &mut World, registry: &CropRegistry) {
    let season = world.calendar.season;

    // 1. Growth, in plot-id order.
    for (id, plot) in world.plots.iter_mut() {
        if let Some(crop) = plot.crop.as_mut() {
            match registry.get(&crop.crop_id) {
                Some(def) => {
                    advance_crop(crop, plot.watered, season, def);
                }
                None => warn!(
                    "[Scheduler] No definition for '{}' at ({}, {}), skipping growth",
                    crop.crop_id, id.x, id.y
                ),
            }
        }
    }

    // 2. Yesterday's watering is spent.
    for plot in world.plots.values_mut() {
        plot.watered = false;
    }

    // 3. New day. A rainy morning waters the farm on the next tick.
    world.calendar.advance_day();
    world.stats.days_played += 1;
    if world.calendar.weather.is_rainy() {
        world
            .events
            .schedule(Trigger::AtTick(world.tick + 1), EventEffect::WaterAllPlots);
    }

    // 4. Deferred day-boundary work.
    world.events.fire_day_boundary(&mut world.plots);

    // 5. Progression check against the day's final stats. Each new unlock
    // gets a deferred notice the UI picks up on the next tick.
    let fired = apply_unlocks(
        &mut world.player,
        &world.stats,
        &mut world.plots,
        &mut world.unlocked_area,
    );
    for unlock in fired {
        let notice = match unlock.target {
            UnlockTarget::Crop(id) => format!("New crop available: {}", id),
            UnlockTarget::FarmArea(size) => format!("Farm expanded to {0}x{0}", size),
        };
        world
            .events
            .schedule(Trigger::AtTick(world.tick + 1), EventEffect::Announce(notice));
    }
}
