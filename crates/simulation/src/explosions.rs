//! Explosion bursts: one expanding flash plus a spray of debris.

use glam::Vec3;
use rand::Rng;

use crate::config::ExplosionConfig;
use crate::instances::ParticleInstance;

/// Flash growth, scale units per second.
const FLASH_GROWTH: f32 = 30.0;
/// Flash opacity lost per unit of growth.
const FLASH_FADE: f32 = 0.2;
const DEBRIS_GRAVITY: f32 = 15.0;
const DEBRIS_DRAG: f32 = 2.0;
const DEBRIS_SIZE: f32 = 1.5;

/// What blew up. Crashes are bigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionKind {
    DroneKill,
    Crash,
}

impl ExplosionKind {
    fn debris_multiplier(self) -> (usize, f32) {
        match self {
            ExplosionKind::DroneKill => (1, 1.0),
            ExplosionKind::Crash => (2, 1.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
    pub opacity: f32,
    /// Flash particles grow in place; debris flies and falls.
    pub is_flash: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub origin: Vec3,
    pub age: f32,
    pub particles: Vec<ExplosionParticle>,
}

impl Explosion {
    fn new<R: Rng>(kind: ExplosionKind, origin: Vec3, config: &ExplosionConfig, rng: &mut R) -> Self {
        let (count_mul, speed_mul) = kind.debris_multiplier();
        let count = config.debris_count * count_mul;
        let mut particles = Vec::with_capacity(count + 1);
        particles.push(ExplosionParticle {
            position: origin,
            velocity: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
            is_flash: true,
        });
        for _ in 0..count {
            let dir = random_direction(rng);
            let speed = config.debris_speed * speed_mul * rng.gen_range(0.5..=1.0);
            particles.push(ExplosionParticle {
                position: origin,
                velocity: dir * speed,
                scale: DEBRIS_SIZE * rng.gen_range(0.5..=1.0),
                opacity: 1.0,
                is_flash: false,
            });
        }
        Self {
            kind,
            origin,
            age: 0.0,
            particles,
        }
    }

    fn update(&mut self, dt: f32, config: &ExplosionConfig) {
        self.age += dt;
        let fade = 1.0 - (self.age / config.lifetime).min(1.0);
        for p in &mut self.particles {
            if p.is_flash {
                p.scale = (1.0 + self.age * FLASH_GROWTH).min(config.flash_max_scale);
                p.opacity = if p.scale >= config.flash_max_scale {
                    0.0
                } else {
                    (1.0 - (p.scale - 1.0) * FLASH_FADE).max(0.0)
                };
            } else {
                p.velocity.y -= DEBRIS_GRAVITY * dt;
                p.velocity *= (1.0 - DEBRIS_DRAG * dt).max(0.0);
                p.position += p.velocity * dt;
                p.opacity = fade;
            }
        }
    }

    pub fn is_finished(&self, config: &ExplosionConfig) -> bool {
        self.age >= config.lifetime
    }

    pub fn flash(&self) -> Option<&ExplosionParticle> {
        self.particles.iter().find(|p| p.is_flash)
    }
}

fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let len2 = v.length_squared();
        if len2 > 1e-4 && len2 <= 1.0 {
            return v / len2.sqrt();
        }
    }
}

/// All explosions currently playing.
#[derive(Debug, Clone)]
pub struct ExplosionSystem {
    config: ExplosionConfig,
    explosions: Vec<Explosion>,
}

impl ExplosionSystem {
    pub fn new(config: ExplosionConfig) -> Self {
        Self {
            config,
            explosions: Vec::new(),
        }
    }

    pub fn spawn<R: Rng>(&mut self, kind: ExplosionKind, origin: Vec3, rng: &mut R) {
        log::debug!("{:?} explosion at {:.0?}", kind, origin);
        self.explosions.push(Explosion::new(kind, origin, &self.config, rng));
    }

    pub fn update(&mut self, dt: f32) {
        for explosion in &mut self.explosions {
            explosion.update(dt, &self.config);
        }
        let config = &self.config;
        self.explosions.retain(|e| !e.is_finished(config));
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.explosions
            .iter()
            .flat_map(|e| e.particles.iter())
            .filter(|p| p.opacity > 0.0)
            .map(|p| ParticleInstance::new(p.position, p.scale, 0.0, p.opacity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn system() -> ExplosionSystem {
        ExplosionSystem::new(ExplosionConfig::default())
    }

    #[test]
    fn crash_is_bigger_than_a_kill() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut fx = system();
        fx.spawn(ExplosionKind::DroneKill, Vec3::ZERO, &mut rng);
        fx.spawn(ExplosionKind::Crash, Vec3::ZERO, &mut rng);
        let kill = &fx.explosions()[0];
        let crash = &fx.explosions()[1];
        assert_eq!(kill.particles.len(), 25);
        assert_eq!(crash.particles.len(), 49);
        assert_eq!(kill.particles.iter().filter(|p| p.is_flash).count(), 1);
    }

    #[test]
    fn flash_grows_fades_and_caps() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut fx = system();
        fx.spawn(ExplosionKind::DroneKill, Vec3::ZERO, &mut rng);

        fx.update(0.05);
        let flash = *fx.explosions()[0].flash().unwrap();
        assert!((flash.scale - 2.5).abs() < 1e-4);
        assert!((flash.opacity - 0.7).abs() < 1e-4);

        fx.update(0.2);
        let flash = *fx.explosions()[0].flash().unwrap();
        assert_eq!(flash.scale, 5.0);
        assert_eq!(flash.opacity, 0.0);
    }

    #[test]
    fn debris_falls_and_fades() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut fx = system();
        fx.spawn(ExplosionKind::Crash, Vec3::new(0.0, 100.0, 0.0), &mut rng);
        for _ in 0..60 {
            fx.update(1.0 / 60.0);
        }
        let e = &fx.explosions()[0];
        for p in e.particles.iter().filter(|p| !p.is_flash) {
            assert!(p.position != e.origin);
            assert!((p.opacity - 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn explosions_end_after_lifetime() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut fx = system();
        fx.spawn(ExplosionKind::DroneKill, Vec3::ZERO, &mut rng);
        fx.update(1.5);
        assert_eq!(fx.len(), 1);
        fx.update(0.5);
        assert!(fx.is_empty());
        assert!(fx.instances().is_empty());
    }
}
