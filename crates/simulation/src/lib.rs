//! Arcade flight-combat simulation core.
//!
//! One `Simulation::tick` per displayed frame runs, in order: flight model,
//! projectiles, drones, combat resolution, contrail/explosion particles and
//! the chase camera. Everything is single-threaded and owned by the
//! component that mutates it.

pub mod camera;
pub mod combat;
pub mod config;
pub mod contrails;
pub mod drones;
pub mod events;
pub mod explosions;
pub mod flight;
pub mod game_loop;
pub mod instances;
pub mod projectiles;
pub mod telemetry;

pub use camera::*;
pub use combat::*;
pub use config::*;
pub use contrails::*;
pub use drones::*;
pub use events::*;
pub use explosions::*;
pub use flight::*;
pub use game_loop::*;
pub use instances::*;
pub use projectiles::*;
pub use telemetry::*;

// Re-export the intent record so callers need only this crate.
pub use input::FlightIntent;
