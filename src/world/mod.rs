//! The root world aggregate.
//!
//! `World` exclusively owns the calendar, the plot grid, the player, the
//! stats, and the pending-event queue. There are no ambient globals: every
//! system call takes the world (or a piece of it) explicitly. The input
//! collaborator drives the facade methods below; the render collaborator
//! reads `view()` and never mutates.

use std::collections::BTreeMap;

use crate::calendar::Calendar;
use crate::economy::{self, ShopListing};
use crate::events::{EventEffect, EventId, EventQueue, Trigger};
use crate::farming::actions;
use crate::scheduler;
use crate::shared::{
    ActionError, CropId, CropRegistry, PlayerState, PlayerStats, Plot, PlotId, Season, Weather,
    FARM_SIZE, STARTING_UNLOCKED_AREA,
};

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub calendar: Calendar,
    pub plots: BTreeMap<PlotId, Plot>,
    pub player: PlayerState,
    pub stats: PlayerStats,
    pub events: EventQueue,
    /// Frame-level tick counter, finer than a day. Drives event polling.
    pub tick: u64,
    pub farm_size: u8,
    pub unlocked_area: u8,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// A fresh farm: full grid allocated, the starting square unlocked.
    pub fn new() -> Self {
        let mut plots = BTreeMap::new();
        for x in 0..FARM_SIZE as i32 {
            for y in 0..FARM_SIZE as i32 {
                let inside =
                    x < STARTING_UNLOCKED_AREA as i32 && y < STARTING_UNLOCKED_AREA as i32;
                plots.insert(
                    PlotId::new(x, y),
                    if inside { Plot::empty() } else { Plot::locked() },
                );
            }
        }

        Self {
            calendar: Calendar::default(),
            plots,
            player: PlayerState::default(),
            stats: PlayerStats::default(),
            events: EventQueue::default(),
            tick: 0,
            farm_size: FARM_SIZE,
            unlocked_area: STARTING_UNLOCKED_AREA,
        }
    }

    // ─── Plot actions ───────────────────────────────────────────────────

    /// Plant a species on a plot. Uses a seed from the pouch when one is
    /// held; otherwise buys one on the spot at the species' seed cost.
    /// Either way the whole action is atomic: any rejection leaves coins,
    /// seeds, and the plot untouched.
    pub fn plant_seed(
        &mut self,
        registry: &CropRegistry,
        plot_id: PlotId,
        crop_id: &str,
    ) -> Result<(), ActionError> {
        if !self.player.has_seeds(crop_id, 1) {
            self.validate_plantable(registry, plot_id, crop_id)?;
            economy::buy_seeds(&mut self.player, registry, crop_id, 1)?;
        }
        actions::plant_seed(
            &mut self.plots,
            &mut self.player,
            registry,
            self.calendar.season,
            plot_id,
            crop_id,
        )
    }

    /// Plant the currently selected species.
    pub fn plant_selected(
        &mut self,
        registry: &CropRegistry,
        plot_id: PlotId,
    ) -> Result<(), ActionError> {
        let crop_id = self.player.selected_crop.clone();
        self.plant_seed(registry, plot_id, &crop_id)
    }

    /// Everything `plant_seed` will check after a purchase, checked first,
    /// so an auto-bought seed never goes to waste on a doomed plant.
    fn validate_plantable(
        &self,
        registry: &CropRegistry,
        plot_id: PlotId,
        crop_id: &str,
    ) -> Result<(), ActionError> {
        let def = registry
            .get(crop_id)
            .ok_or_else(|| ActionError::UnknownCropType(crop_id.to_string()))?;
        if !self.player.is_unlocked(crop_id) {
            return Err(ActionError::CropLocked(crop_id.to_string()));
        }
        if !def.grows_in(self.calendar.season) {
            return Err(ActionError::OutOfSeason(
                crop_id.to_string(),
                self.calendar.season,
            ));
        }
        let plot = self
            .plots
            .get(&plot_id)
            .ok_or(ActionError::InvalidPlot(plot_id.x, plot_id.y))?;
        if !plot.unlocked {
            return Err(ActionError::PlotLocked);
        }
        if !plot.is_empty() {
            return Err(ActionError::PlotOccupied);
        }
        Ok(())
    }

    pub fn water_plot(&mut self, plot_id: PlotId) -> Result<(), ActionError> {
        actions::water_plot(&mut self.plots, plot_id)
    }

    pub fn harvest(
        &mut self,
        registry: &CropRegistry,
        plot_id: PlotId,
    ) -> Result<CropId, ActionError> {
        actions::harvest(
            &mut self.plots,
            &mut self.player,
            &mut self.stats,
            registry,
            plot_id,
        )
    }

    pub fn clear_plot(&mut self, plot_id: PlotId) -> Result<(), ActionError> {
        actions::clear_plot(&mut self.plots, plot_id)
    }

    // ─── Time ───────────────────────────────────────────────────────────

    /// Run the full daily pipeline (growth, calendar, events, unlocks).
    pub fn advance_day(&mut self, registry: &CropRegistry) {
        scheduler::advance_day(self, registry);
    }

    /// One frame-level simulation step: advance the tick counter and apply
    /// any pending events that have come due.
    pub fn tick(&mut self) {
        self.tick += 1;
        let tick = self.tick;
        self.events.poll_tick(tick, &mut self.plots);
    }

    /// Queue a rain burst. Returns immediately; the farm is watered when the
    /// event fires on the next tick.
    pub fn trigger_rain(&mut self) -> EventId {
        self.events
            .schedule(Trigger::AtTick(self.tick + 1), EventEffect::WaterAllPlots)
    }

    // ─── Economy ────────────────────────────────────────────────────────

    pub fn select_crop(
        &mut self,
        registry: &CropRegistry,
        crop_id: &str,
    ) -> Result<(), ActionError> {
        if !registry.contains(crop_id) {
            return Err(ActionError::UnknownCropType(crop_id.to_string()));
        }
        if !self.player.is_unlocked(crop_id) {
            return Err(ActionError::CropLocked(crop_id.to_string()));
        }
        self.player.selected_crop = crop_id.to_string();
        Ok(())
    }

    pub fn buy_seeds(
        &mut self,
        registry: &CropRegistry,
        crop_id: &str,
        quantity: u32,
    ) -> Result<(), ActionError> {
        economy::buy_seeds(&mut self.player, registry, crop_id, quantity)
    }

    pub fn sell_goods(
        &mut self,
        registry: &CropRegistry,
        crop_id: &str,
        quantity: u32,
    ) -> Result<u32, ActionError> {
        economy::sell_goods(&mut self.player, &mut self.stats, registry, crop_id, quantity)
    }

    pub fn shop_listings(&self, registry: &CropRegistry) -> Vec<ShopListing> {
        economy::shop_listings(registry, &self.player)
    }

    // ─── Render view ────────────────────────────────────────────────────

    /// Read-only snapshot for the render collaborator.
    pub fn view(&self) -> WorldView<'_> {
        WorldView {
            day: self.calendar.day,
            season: self.calendar.season,
            weather: self.calendar.weather,
            tick: self.tick,
            farm_size: self.farm_size,
            unlocked_area: self.unlocked_area,
            coins: self.player.coins,
            selected_crop: &self.player.selected_crop,
            plots: &self.plots,
            player: &self.player,
            stats: &self.stats,
        }
    }
}

/// Borrowed, read-only view of the world, rebuilt each frame.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub day: u32,
    pub season: Season,
    pub weather: Weather,
    pub tick: u64,
    pub farm_size: u8,
    pub unlocked_area: u8,
    pub coins: u32,
    pub selected_crop: &'a str,
    pub plots: &'a BTreeMap<PlotId, Plot>,
    pub player: &'a PlayerState,
    pub stats: &'a PlayerStats,
}
