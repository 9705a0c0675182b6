//! Crop growth engine.
//!
//! A pure function of the crop, the day's watered flag, the season, and the
//! species definition. Never fails; terminal stages pass through unchanged.

use crate::shared::{Crop, CropDef, GrowthStage, Season};

/// Advance one crop by one day and return its new stage.
///
/// Watered: the stage counter advances; once it reaches the stage's required
/// days, the crop moves to the next stage and the counter resets. Watering
/// also clears the drought counter.
///
/// Unwatered: the drought counter advances instead; once it exceeds the
/// species' tolerance the crop dies, regardless of growth progress.
///
/// Out of season, the crop dies outright.
///
/// Mature is terminal for growth — a mature crop stays harvestable and never
/// regresses. Dead is fully terminal.
pub fn advance_crop(crop: &mut Crop, watered_today: bool, season: Season, def: &CropDef) -> GrowthStage {
    if crop.stage == GrowthStage::Dead {
        return crop.stage;
    }

    if !def.grows_in(season) {
        crop.stage = GrowthStage::Dead;
        return crop.stage;
    }

    if watered_today {
        crop.days_without_water = 0;

        if let Some(idx) = crop.stage.stage_index() {
            crop.days_in_stage += 1;
            let required = def.stage_days.get(idx).copied().unwrap_or(1);
            if crop.days_in_stage >= required {
                crop.stage = crop.stage.next();
                crop.days_in_stage = 0;
            }
        }
        // Mature: watering is a no-op for growth.
    } else {
        crop.days_without_water += 1;
        if crop.days_without_water > def.drought_tolerance {
            crop.stage = GrowthStage::Dead;
        }
    }

    crop.stage
}
