//! Static game content, loaded once at startup.

pub mod crops;

use crate::shared::CropRegistry;

/// Build the fully-populated crop registry.
pub fn build_crop_registry() -> CropRegistry {
    let mut registry = CropRegistry::default();
    crops::populate_crops(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_species() {
        let registry = build_crop_registry();
        for id in ["wheat", "carrot", "tomato", "corn"] {
            assert!(registry.contains(id), "missing crop def: {id}");
        }
    }

    #[test]
    fn test_only_wheat_starts_unlocked() {
        let registry = build_crop_registry();
        let unlocked: Vec<_> = registry
            .crops
            .values()
            .filter(|def| def.starts_unlocked)
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(unlocked, vec!["wheat"]);
    }
}
