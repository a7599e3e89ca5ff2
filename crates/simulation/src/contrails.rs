//! Contrail particles in a fixed ring buffer.
//!
//! Slots are handed out by a single cursor that wraps around the pool.
//! Allocation never searches for a free slot: under sustained emission the
//! oldest particle is overwritten even if it is still alive. Storage is
//! allocated once and reused for the lifetime of the pool.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::ContrailConfig;
use crate::instances::ParticleInstance;

/// Where inactive slots are parked so stale draws land out of view.
pub const OFFSTAGE: Vec3 = Vec3::new(0.0, -100_000.0, 0.0);
/// Shortest and longest particle life, seconds.
const LIFE_MIN: f32 = 2.0;
const LIFE_MAX: f32 = 3.0;
/// A particle grows to `1 + GROWTH` times its spawn scale by end of life.
const GROWTH: f32 = 5.0;

/// One pool slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrailParticle {
    pub active: bool,
    pub age: f32,
    pub life: f32,
    pub position: Vec3,
    /// Scale at spawn.
    pub scale: f32,
    /// Rotation at spawn.
    pub base_rotation: f32,
}

impl Default for ContrailParticle {
    fn default() -> Self {
        Self {
            active: false,
            age: 0.0,
            life: 0.0,
            position: OFFSTAGE,
            scale: 0.0,
            base_rotation: 0.0,
        }
    }
}

impl ContrailParticle {
    /// Fraction of life used, 0..1.
    pub fn life_ratio(&self) -> f32 {
        if self.life > 0.0 {
            (self.age / self.life).min(1.0)
        } else {
            1.0
        }
    }

    pub fn apparent_scale(&self) -> f32 {
        self.scale * (1.0 + self.life_ratio() * GROWTH)
    }

    pub fn rotation(&self) -> f32 {
        self.base_rotation + self.life_ratio()
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.life_ratio()
    }
}

/// Fixed-capacity ring buffer of contrail particles.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<ContrailParticle>,
    cursor: usize,
    jitter: f32,
    base_scale: f32,
}

impl ParticlePool {
    pub fn new(config: &ContrailConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            slots: vec![ContrailParticle::default(); capacity],
            cursor: 0,
            jitter: config.jitter,
            base_scale: config.base_scale,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index the next spawn will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slots(&self) -> &[ContrailParticle] {
        &self.slots
    }

    /// Activate the slot under the cursor around `anchor` and advance the
    /// cursor. Returns the slot index used.
    pub fn spawn<R: Rng>(&mut self, anchor: Vec3, rng: &mut R) -> usize {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.slots.len();

        let jitter = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        ) * self.jitter;

        self.slots[index] = ContrailParticle {
            active: true,
            age: 0.0,
            life: rng.gen_range(LIFE_MIN..=LIFE_MAX),
            position: anchor + jitter,
            scale: self.base_scale,
            base_rotation: rng.gen_range(0.0..TAU),
        };
        index
    }

    pub fn emit<R: Rng>(&mut self, anchors: &[Vec3], rng: &mut R) {
        for &anchor in anchors {
            self.spawn(anchor, rng);
        }
    }

    /// Age every live particle; retire the ones past their life.
    pub fn update(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.age += dt;
            if slot.age > slot.life {
                slot.active = false;
                slot.position = OFFSTAGE;
            }
        }
    }

    /// Deactivate everything. The cursor keeps its place.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = ContrailParticle::default();
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &ContrailParticle> {
        self.slots.iter().filter(|s| s.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.active()
            .map(|p| ParticleInstance::new(p.position, p.apparent_scale(), p.rotation(), p.opacity()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(capacity: usize) -> ParticlePool {
        ParticlePool::new(&ContrailConfig { capacity, ..Default::default() })
    }

    #[test]
    fn spawn_jitters_around_anchor() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = pool(16);
        let anchor = Vec3::new(10.0, 500.0, -30.0);
        for _ in 0..16 {
            let i = pool.spawn(anchor, &mut rng);
            let p = pool.slots()[i];
            assert!(p.active);
            assert_eq!(p.age, 0.0);
            assert!((LIFE_MIN..=LIFE_MAX).contains(&p.life));
            let d = p.position - anchor;
            assert!(d.abs().max_element() <= 0.4 + 1e-4);
        }
        assert_eq!(pool.active_count(), 16);
    }

    #[test]
    fn cursor_wraps_in_strict_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = pool(4);
        let used: Vec<usize> = (0..10).map(|_| pool.spawn(Vec3::ZERO, &mut rng)).collect();
        assert_eq!(used, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
        assert_eq!(pool.cursor(), 2);
    }

    #[test]
    fn overflow_evicts_oldest_live_slot() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut pool = pool(3);
        for i in 0..3 {
            pool.spawn(Vec3::new(i as f32 * 100.0, 0.0, 0.0), &mut rng);
        }
        pool.update(0.5);
        assert_eq!(pool.active_count(), 3);

        // Slot 0 is still alive but gets overwritten.
        let i = pool.spawn(Vec3::new(900.0, 0.0, 0.0), &mut rng);
        assert_eq!(i, 0);
        let p = pool.slots()[0];
        assert_eq!(p.age, 0.0);
        assert!(p.position.x > 899.0);
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn expired_slots_move_offstage() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = pool(8);
        pool.spawn(Vec3::ONE, &mut rng);
        pool.update(2.5);
        pool.update(0.6);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.slots()[0].position, OFFSTAGE);
        assert_eq!(pool.capacity(), 8);
    }

    #[test]
    fn particles_grow_and_fade_with_age() {
        let p = ContrailParticle {
            active: true,
            age: 1.0,
            life: 2.0,
            position: Vec3::ZERO,
            scale: 1.0,
            base_rotation: 0.25,
        };
        assert_eq!(p.apparent_scale(), 3.5);
        assert_eq!(p.rotation(), 0.75);
        assert_eq!(p.opacity(), 0.5);

        let end = ContrailParticle { age: 2.0, ..p };
        assert_eq!(end.apparent_scale(), 6.0);
    }

    #[test]
    fn clear_empties_pool_without_shrinking() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = pool(10);
        pool.emit(&[Vec3::ZERO, Vec3::X, Vec3::Y], &mut rng);
        assert_eq!(pool.instances().len(), 3);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.cursor(), 3);
    }
}
