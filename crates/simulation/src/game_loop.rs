//! Frame orchestration: runs every system in a fixed order once per tick and
//! owns the crash/reset cycle.

use engine_core::{Transform, Vec3};
use procgen::{CloudField, HeightField};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::CameraController;
use crate::combat::CombatResolver;
use crate::config::SimConfig;
use crate::contrails::ParticlePool;
use crate::drones::DroneManager;
use crate::events::SimEvent;
use crate::explosions::{ExplosionKind, ExplosionSystem};
use crate::flight::{FlightFrame, FlightModel};
use crate::projectiles::ProjectileSystem;
use crate::telemetry::FlightTelemetry;
use input::FlightIntent;

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    Flying,
    /// Crashed; the session resets once the clock reaches `reset_at`.
    GameOver { reset_at: f64 },
}

/// The whole simulated world.
pub struct Simulation {
    config: SimConfig,
    field: HeightField,
    flight: FlightModel,
    projectiles: ProjectileSystem,
    drones: DroneManager,
    contrails: ParticlePool,
    explosions: ExplosionSystem,
    camera: CameraController,
    clouds: CloudField,
    phase: GamePhase,
    player_visible: bool,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = HeightField::new();
        let spawn = spawn_position(&config, &field);
        let flight = FlightModel::new(config.flight.clone(), spawn);
        let camera = CameraController::new(config.camera.clone(), flight.transform());
        let clouds = CloudField::generate(&config.clouds, &mut rng);

        log::info!(
            "Simulation ready: spawn {:.0?}, {} cloud puffs, seed {:?}",
            spawn,
            clouds.puff_count(),
            config.session.seed
        );

        Self {
            projectiles: ProjectileSystem::new(config.weapon.clone()),
            drones: DroneManager::new(config.drones.clone()),
            contrails: ParticlePool::new(&config.contrails),
            explosions: ExplosionSystem::new(config.explosions.clone()),
            config,
            field,
            flight,
            camera,
            clouds,
            phase: GamePhase::Flying,
            player_visible: true,
            rng,
        }
    }

    /// Advance one displayed frame. `dt` is wall-clock seconds since the
    /// previous frame and is clamped to `[0, max_frame_dt]`; `now` is the
    /// real-time clock used by the fire limiter and the reset timer.
    pub fn tick(&mut self, intent: &FlightIntent, dt: f32, now: f64) -> Vec<SimEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.session.frame_dt_cap())
        } else {
            0.0
        };
        let mut events = Vec::new();

        if let GamePhase::GameOver { reset_at } = self.phase {
            if now >= reset_at {
                events.push(self.reset());
            }
        }
        let flying = self.is_flying();

        // Aircraft and weapon.
        let mut frame = FlightFrame::default();
        if flying {
            frame = self.flight.update(intent, dt);
            if intent.fire {
                let speed = self.flight.state().speed;
                self.projectiles
                    .fire(self.flight.transform(), speed, now, &mut self.rng);
            }
        }
        self.projectiles.advance(dt);

        self.drones
            .update(self.flight.transform(), dt, flying, &mut self.rng);

        let kills = CombatResolver::resolve(
            &mut self.projectiles,
            &mut self.drones,
            &mut self.explosions,
            &mut self.rng,
        );
        events.extend(kills.into_iter().map(|kill| SimEvent::ExplosionTriggered {
            position: kill.position,
            kind: ExplosionKind::DroneKill,
        }));

        if flying && CombatResolver::ground_collision(self.flight.state().position(), &self.field) {
            events.extend(self.trigger_game_over(now));
        }

        // Visual feedback.
        if flying {
            let anchors = self.flight.contrail_anchors(&frame, &self.config.contrails);
            self.contrails.emit(&anchors, &mut self.rng);
        }
        self.contrails.update(dt);
        log::trace!(
            "Contrails: {}/{} live, cursor {}",
            self.contrails.active_count(),
            self.contrails.capacity(),
            self.contrails.cursor()
        );
        self.explosions.update(dt);
        self.clouds.update(dt);

        if self.is_flying() {
            let nitro = self.flight.state().nitro;
            self.camera.update(self.flight.transform(), intent, nitro);
        }

        events
    }

    /// Crash the player. A no-op unless currently flying.
    pub(crate) fn trigger_game_over(&mut self, now: f64) -> Vec<SimEvent> {
        if !self.is_flying() {
            return Vec::new();
        }
        let position = self.flight.state().position();
        self.phase = GamePhase::GameOver {
            reset_at: now + self.config.session.reset_delay,
        };
        self.explosions
            .spawn(ExplosionKind::Crash, position, &mut self.rng);
        self.player_visible = false;
        self.flight.crash();
        log::info!(
            "Crashed at {:.0?}, resetting in {:.1}s",
            position,
            self.config.session.reset_delay
        );

        vec![
            SimEvent::ExplosionTriggered {
                position,
                kind: ExplosionKind::Crash,
            },
            SimEvent::GameOver { position },
        ]
    }

    /// Return to a fresh session at the spawn point. Explosions already
    /// playing are left to finish.
    pub fn reset(&mut self) -> SimEvent {
        let position = spawn_position(&self.config, &self.field);
        self.flight.reset(position);
        self.projectiles.clear();
        self.drones.clear();
        self.contrails.clear();
        self.camera.snap_to(self.flight.transform());
        self.phase = GamePhase::Flying;
        self.player_visible = true;
        log::info!("Session reset at {:.0?}", position);
        SimEvent::Reset { position }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_flying(&self) -> bool {
        self.phase == GamePhase::Flying
    }

    pub fn player_visible(&self) -> bool {
        self.player_visible
    }

    /// Aircraft transform for drawing, including cosmetic bank.
    pub fn player_transform(&self) -> Transform {
        self.flight.visual_transform()
    }

    pub fn telemetry(&self) -> FlightTelemetry {
        FlightTelemetry::from(&self.flight)
    }

    pub fn flight(&self) -> &FlightModel {
        &self.flight
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn drones(&self) -> &DroneManager {
        &self.drones
    }

    pub fn contrails(&self) -> &ParticlePool {
        &self.contrails
    }

    pub fn explosions(&self) -> &ExplosionSystem {
        &self.explosions
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn clouds(&self) -> &CloudField {
        &self.clouds
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Spawn point lifted to keep the configured clearance above terrain.
fn spawn_position(config: &SimConfig, field: &HeightField) -> Vec3 {
    let mut position = config.session.spawn_point;
    let floor = field.height_below(position) + config.session.spawn_clearance;
    position.y = position.y.max(floor);
    position
}
