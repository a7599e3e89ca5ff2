//! Projectile-versus-drone hits and ground impact.

use glam::Vec3;
use procgen::HeightField;
use rand::Rng;

use crate::drones::DroneManager;
use crate::explosions::{ExplosionKind, ExplosionSystem};
use crate::projectiles::ProjectileSystem;

/// A round within this distance of a drone centre destroys it. Flat
/// threshold; neither the drone's nor the round's own radius is used.
pub const HIT_RADIUS: f32 = 4.0;
/// The craft crashes when it drops below terrain height plus this margin.
pub const GROUND_CLEARANCE: f32 = 5.0;

/// A confirmed drone kill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub drone_id: u64,
    pub position: Vec3,
}

/// Stateless hit resolution over the owned projectile and drone lists.
pub struct CombatResolver;

impl CombatResolver {
    /// Each round hits at most one drone: the first active drone in spawn
    /// order within [`HIT_RADIUS`]. Hit rounds are removed, hit drones are
    /// marked inactive and an explosion starts at each. One hit is lethal.
    pub fn resolve<R: Rng>(
        projectiles: &mut ProjectileSystem,
        drones: &mut DroneManager,
        explosions: &mut ExplosionSystem,
        rng: &mut R,
    ) -> Vec<Kill> {
        let mut kills = Vec::new();
        let targets = drones.drones_mut();

        projectiles.retain(|round| {
            let position = round.position();
            let hit = targets
                .iter_mut()
                .find(|d| d.active && d.position.distance(position) < HIT_RADIUS);
            match hit {
                Some(drone) => {
                    drone.active = false;
                    kills.push(Kill {
                        drone_id: drone.id,
                        position: drone.position,
                    });
                    false
                }
                None => true,
            }
        });

        for kill in &kills {
            log::debug!("Drone {} destroyed", kill.drone_id);
            explosions.spawn(ExplosionKind::DroneKill, kill.position, rng);
        }
        kills
    }

    /// True when `position` is below the terrain plus clearance.
    pub fn ground_collision(position: Vec3, field: &HeightField) -> bool {
        position.y < field.height_below(position) + GROUND_CLEARANCE
    }
}
