//! Farming domain — crop lifecycle and the player's plot actions.
//!
//! `growth` is the pure per-crop growth engine the scheduler drives once per
//! day; `actions` holds the plant/water/harvest entry points the input layer
//! calls.

pub mod actions;
pub mod growth;
