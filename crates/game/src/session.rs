//! One play session: the simulation plus everything the binary layers on top
//! (scenery, models, event logging, counters).

use procgen::TerrainConfig;
use simulation::{ExplosionKind, FlightIntent, SimEvent, Simulation};

use crate::config::GameConfig;
use crate::hud::HudReadout;
use crate::models::{ModelLibrary, ModelSlot};
use crate::scenery::Scenery;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub kills: u32,
    pub crashes: u32,
    pub resets: u32,
}

pub struct Session {
    pub sim: Simulation,
    pub models: ModelLibrary,
    pub scenery: Scenery,
    pub stats: SessionStats,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        let sim_config = config.sim_config();
        let seed = sim_config.session.seed;
        let sim = Simulation::new(sim_config);
        let scenery = Scenery::build(sim.height_field(), TerrainConfig::default(), config.tree_count, seed);

        let mut models = ModelLibrary::new();
        if let Some(path) = &config.models.aircraft {
            models.request(ModelSlot::Aircraft, path.clone());
        }
        if let Some(path) = &config.models.drone {
            models.request(ModelSlot::Drone, path.clone());
        }

        Self {
            sim,
            models,
            scenery,
            stats: SessionStats::default(),
        }
    }

    /// Run one frame and account for what happened.
    pub fn frame(&mut self, intent: &FlightIntent, dt: f32, now: f64) -> Vec<SimEvent> {
        let events = self.sim.tick(intent, dt, now);
        self.models.poll();
        self.stats.frames += 1;

        for event in &events {
            match event {
                SimEvent::ExplosionTriggered { kind: ExplosionKind::DroneKill, position } => {
                    self.stats.kills += 1;
                    log::info!("Drone down at {:.0?} ({} total)", position, self.stats.kills);
                }
                SimEvent::ExplosionTriggered { kind: ExplosionKind::Crash, .. } => {}
                SimEvent::GameOver { position } => {
                    self.stats.crashes += 1;
                    log::info!("GAME OVER at {:.0?}", position);
                }
                SimEvent::Reset { .. } => {
                    self.stats.resets += 1;
                }
            }
        }
        events
    }

    /// Log what the session is made of.
    pub fn describe(&self) {
        log::info!(
            "World: {} terrain triangles, {} trees, {} cloud puffs; models '{}' / '{}' ({} loading)",
            self.scenery.terrain.indices.len() / 3,
            self.scenery.trees.len(),
            self.sim.clouds().puff_count(),
            self.models.aircraft.name,
            self.models.drone.name,
            self.models.pending()
        );
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout::from(&self.sim.telemetry())
    }
}
