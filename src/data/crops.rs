//! Crop species definitions.

use crate::shared::{CropDef, CropRegistry, Season};

/// Populate the CropRegistry with all crop definitions.
///
/// Each species lists days per pre-mature stage (Seed, Sprouting, Growing);
/// the sum is the watered-day count from planting to harvestable. Only wheat
/// is available from day one — the rest come from the unlock system:
///   carrot  → 5 total harvests
///   tomato  → 15 total harvests
///   corn    → 100 coins earned
pub fn populate_crops(registry: &mut CropRegistry) {
    let crops: Vec<CropDef> = vec![
        CropDef {
            id: "wheat".into(),
            name: "Wheat".into(),
            // 3 watered days to mature
            stage_days: vec![1, 1, 1],
            drought_tolerance: 2,
            seed_cost: 5,
            sell_price: 15,
            // Hardy — grows year round.
            seasons: vec![],
            starts_unlocked: true,
        },
        CropDef {
            id: "carrot".into(),
            name: "Carrot".into(),
            // 4 watered days to mature
            stage_days: vec![1, 1, 2],
            drought_tolerance: 2,
            seed_cost: 10,
            sell_price: 25,
            seasons: vec![Season::Spring, Season::Fall],
            starts_unlocked: false,
        },
        CropDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            // 5 watered days to mature
            stage_days: vec![1, 2, 2],
            drought_tolerance: 3,
            seed_cost: 15,
            sell_price: 40,
            seasons: vec![Season::Summer],
            starts_unlocked: false,
        },
        CropDef {
            id: "corn".into(),
            name: "Corn".into(),
            // 6 watered days to mature
            stage_days: vec![2, 2, 2],
            drought_tolerance: 3,
            seed_cost: 20,
            sell_price: 60,
            seasons: vec![Season::Summer, Season::Fall],
            starts_unlocked: false,
        },
    ];

    for crop in crops {
        registry.crops.insert(crop.id.clone(), crop);
    }
}
