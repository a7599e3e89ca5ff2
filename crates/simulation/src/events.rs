//! Discrete notifications raised by a simulation tick.

use glam::Vec3;

use crate::explosions::ExplosionKind;

/// Something a presentation layer may want to react to (sound, flash, HUD).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// An explosion started at `position`.
    ExplosionTriggered { position: Vec3, kind: ExplosionKind },
    /// The player crashed. Raised once per crash.
    GameOver { position: Vec3 },
    /// The player was returned to the spawn point.
    Reset { position: Vec3 },
}

impl SimEvent {
    pub fn position(&self) -> Vec3 {
        match *self {
            SimEvent::ExplosionTriggered { position, .. }
            | SimEvent::GameOver { position }
            | SimEvent::Reset { position } => position,
        }
    }
}
