//! Furrowfield — a headless farming-simulation core.
//!
//! The crate owns the simulation: plots, crops, the daily growth pipeline,
//! the pending-event queue, progression unlocks, the seed/goods economy, and
//! versioned save snapshots. Rendering and input are external collaborators:
//! they call the `world::World` facade and read `World::view()`, and nothing
//! here ever calls back into them.

pub mod shared;
pub mod data;
pub mod calendar;
pub mod farming;
pub mod events;
pub mod unlocks;
pub mod economy;
pub mod scheduler;
pub mod save;
pub mod world;

pub use shared::{ActionError, CropRegistry};
pub use world::World;
