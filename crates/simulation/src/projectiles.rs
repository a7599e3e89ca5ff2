//! Nose-cannon rounds: rate-limited firing, straight-line flight, silent expiry.

use engine_core::{Lifetime, Quat, Transform, Vec3};
use rand::Rng;

use crate::config::WeaponConfig;

/// A round in flight. Orientation is frozen at fire time.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub transform: Transform,
    pub speed: f32,
    pub lifetime: Lifetime,
}

impl Projectile {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

/// Owns every live projectile and the fire-rate limiter.
#[derive(Debug, Clone)]
pub struct ProjectileSystem {
    config: WeaponConfig,
    projectiles: Vec<Projectile>,
    last_shot: Option<f64>,
}

impl ProjectileSystem {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            projectiles: Vec::new(),
            last_shot: None,
        }
    }

    /// Fire from `origin` at real time `now`. Returns `None` while the
    /// cannon is still cycling.
    pub fn fire<R: Rng>(
        &mut self,
        origin: &Transform,
        current_speed: f32,
        now: f64,
        rng: &mut R,
    ) -> Option<&Projectile> {
        if let Some(last) = self.last_shot {
            if now - last < self.config.fire_interval {
                return None;
            }
        }
        self.last_shot = Some(now);

        let spread = self.config.spread;
        let (sx, sy) = if spread > 0.0 {
            (rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread))
        } else {
            (0.0, 0.0)
        };
        let rotation = (origin.rotation * Quat::from_rotation_x(sx) * Quat::from_rotation_y(sy)).normalize();
        let position = origin.transform_point(self.config.muzzle_offset);

        self.projectiles.push(Projectile {
            transform: Transform::from_position_rotation(position, rotation),
            speed: current_speed + self.config.muzzle_speed,
            lifetime: Lifetime::new(self.config.projectile_lifetime),
        });
        self.projectiles.last()
    }

    /// Move every round forward and drop the expired ones.
    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.projectiles {
            p.transform.translate_local(Vec3::new(0.0, 0.0, -p.speed * dt));
            p.lifetime.update(dt);
        }
        self.projectiles.retain(|p| !p.lifetime.is_expired());
    }

    /// Keep only the rounds `keep` approves. Used for hit removal.
    pub fn retain(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.projectiles.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Drop every round. The rate limiter keeps its history.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }
}
