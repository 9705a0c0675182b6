//! Economy domain — the seed shop and the goods market.
//!
//! Responsible for:
//! - Buying seeds (atomic: funds are checked before any mutation)
//! - Selling harvested goods at the species' sale value
//! - Building the read-only shop listing the UI renders
//!
//! Coins are `u32`, so the balance cannot go negative; every purchase is
//! check-then-deduct and a failed purchase leaves the player untouched.

use tracing::info;

use crate::shared::{ActionError, CropRegistry, PlayerState, PlayerStats};

/// One row of the shop view.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopListing {
    pub crop_id: String,
    pub name: String,
    pub seed_cost: u32,
    pub sell_price: u32,
    pub unlocked: bool,
    pub affordable: bool,
}

/// Every species in the registry, in id order, annotated with what the
/// player can do about it right now.
pub fn shop_listings(registry: &CropRegistry, player: &PlayerState) -> Vec<ShopListing> {
    registry
        .crops
        .values()
        .map(|def| ShopListing {
            crop_id: def.id.clone(),
            name: def.name.clone(),
            seed_cost: def.seed_cost,
            sell_price: def.sell_price,
            unlocked: player.is_unlocked(&def.id),
            affordable: player.can_afford(def.seed_cost),
        })
        .collect()
}

/// Buy `quantity` seeds of a species. Locked species cannot be bought even
/// with sufficient funds.
pub fn buy_seeds(
    player: &mut PlayerState,
    registry: &CropRegistry,
    crop_id: &str,
    quantity: u32,
) -> Result<(), ActionError> {
    let def = registry
        .get(crop_id)
        .ok_or_else(|| ActionError::UnknownCropType(crop_id.to_string()))?;

    if !player.is_unlocked(crop_id) {
        return Err(ActionError::CropLocked(crop_id.to_string()));
    }

    // A cost past u32::MAX can never be affordable; reject before touching
    // anything so the purchase stays atomic.
    let total_cost =
        def.seed_cost
            .checked_mul(quantity)
            .ok_or(ActionError::InsufficientFunds {
                have: player.coins,
                need: u32::MAX,
            })?;
    if !player.can_afford(total_cost) {
        return Err(ActionError::InsufficientFunds {
            have: player.coins,
            need: total_cost,
        });
    }

    player.coins -= total_cost;
    let held = player.seeds.entry(crop_id.to_string()).or_insert(0);
    *held = held.saturating_add(quantity);

    info!(
        "[Economy] Bought {} {} seed(s) for {} coins ({} left)",
        quantity, def.name, total_cost, player.coins
    );
    Ok(())
}

/// Sell `quantity` harvested goods of a species at its sale value. Returns
/// the coins earned. Sales feed `total_coins_earned`, which gates unlocks.
pub fn sell_goods(
    player: &mut PlayerState,
    stats: &mut PlayerStats,
    registry: &CropRegistry,
    crop_id: &str,
    quantity: u32,
) -> Result<u32, ActionError> {
    let def = registry
        .get(crop_id)
        .ok_or_else(|| ActionError::UnknownCropType(crop_id.to_string()))?;

    let have = player.goods_count(crop_id);
    if have < quantity {
        return Err(ActionError::NotEnoughGoods {
            have,
            need: quantity,
        });
    }

    // Payouts clamp at the coin cap instead of wrapping.
    let earned = def.sell_price.saturating_mul(quantity);
    *player.goods.entry(crop_id.to_string()).or_insert(0) -= quantity;
    player.coins = player.coins.saturating_add(earned);
    stats.total_coins_earned = stats.total_coins_earned.saturating_add(earned);

    info!(
        "[Economy] Sold {} {} for {} coins ({} total)",
        quantity, def.name, earned, player.coins
    );
    Ok(earned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_crop_registry;
    use crate::shared::STARTING_COINS;

    #[test]
    fn test_buy_seeds_deducts_coins_and_adds_seeds() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        let wheat_cost = registry.get("wheat").unwrap().seed_cost;

        buy_seeds(&mut player, &registry, "wheat", 2).unwrap();
        assert_eq!(player.coins, STARTING_COINS - 2 * wheat_cost);
        assert!(player.has_seeds("wheat", crate::shared::STARTING_WHEAT_SEEDS + 2));
    }

    #[test]
    fn test_buy_without_funds_is_atomic() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        player.coins = 3; // below wheat's cost

        let err = buy_seeds(&mut player, &registry, "wheat", 1).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientFunds { have: 3, .. }));
        assert_eq!(player.coins, 3, "no partial deduction");
        assert!(player.has_seeds("wheat", crate::shared::STARTING_WHEAT_SEEDS));
    }

    #[test]
    fn test_buy_locked_crop_is_rejected_even_with_funds() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        player.coins = 1_000;

        let err = buy_seeds(&mut player, &registry, "corn", 1).unwrap_err();
        assert_eq!(err, ActionError::CropLocked("corn".into()));
        assert_eq!(player.coins, 1_000);
    }

    #[test]
    fn test_buy_with_overflowing_quantity_is_rejected() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();

        // wheat's cost times a billion seeds does not fit in u32.
        let err = buy_seeds(&mut player, &registry, "wheat", 1_000_000_000).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientFunds { .. }));
        assert_eq!(player.coins, STARTING_COINS, "no deduction");
        assert!(player.has_seeds("wheat", crate::shared::STARTING_WHEAT_SEEDS));
        assert!(
            !player.has_seeds("wheat", crate::shared::STARTING_WHEAT_SEEDS + 1),
            "no seeds granted"
        );
    }

    #[test]
    fn test_sell_payout_clamps_at_the_coin_cap() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        let mut stats = PlayerStats::default();
        player.goods.insert("wheat".into(), u32::MAX);

        let earned = sell_goods(&mut player, &mut stats, &registry, "wheat", u32::MAX).unwrap();
        assert_eq!(earned, u32::MAX);
        assert_eq!(player.coins, u32::MAX);
        assert_eq!(stats.total_coins_earned, u32::MAX);
        assert_eq!(player.goods_count("wheat"), 0);
    }

    #[test]
    fn test_buy_unknown_species_is_rejected() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();

        let err = buy_seeds(&mut player, &registry, "mandrake", 1).unwrap_err();
        assert_eq!(err, ActionError::UnknownCropType("mandrake".into()));
    }

    #[test]
    fn test_sell_goods_pays_out_and_tracks_earnings() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        let mut stats = PlayerStats::default();
        player.goods.insert("wheat".into(), 3);
        let price = registry.get("wheat").unwrap().sell_price;

        let earned = sell_goods(&mut player, &mut stats, &registry, "wheat", 2).unwrap();
        assert_eq!(earned, 2 * price);
        assert_eq!(player.coins, STARTING_COINS + earned);
        assert_eq!(player.goods_count("wheat"), 1);
        assert_eq!(stats.total_coins_earned, earned);
    }

    #[test]
    fn test_sell_more_than_held_is_rejected() {
        let registry = build_crop_registry();
        let mut player = PlayerState::default();
        let mut stats = PlayerStats::default();
        player.goods.insert("wheat".into(), 1);

        let err = sell_goods(&mut player, &mut stats, &registry, "wheat", 2).unwrap_err();
        assert_eq!(err, ActionError::NotEnoughGoods { have: 1, need: 2 });
        assert_eq!(player.goods_count("wheat"), 1);
        assert_eq!(stats.total_coins_earned, 0);
    }

    #[test]
    fn test_shop_listing_reflects_lock_state() {
        let registry = build_crop_registry();
        let player = PlayerState::default();

        let listings = shop_listings(&registry, &player);
        assert_eq!(listings.len(), 4);

        let wheat = listings.iter().find(|l| l.crop_id == "wheat").unwrap();
        assert!(wheat.unlocked);
        assert!(wheat.affordable);

        let corn = listings.iter().find(|l| l.crop_id == "corn").unwrap();
        assert!(!corn.unlocked);
    }
}
