//! Game configuration (window, run mode, simulation tuning). Loaded from
//! config.ron at startup.

use serde::{Deserialize, Serialize};
use simulation::SimConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Optional model descriptions to load in the background. Missing entries
/// keep the built-in placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelPaths {
    #[serde(default)]
    pub aircraft: Option<PathBuf>,
    #[serde(default)]
    pub drone: Option<PathBuf>,
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Run the autopilot without a window.
    #[serde(default)]
    pub headless: bool,
    /// Simulated seconds per headless run.
    #[serde(default = "default_headless_seconds")]
    pub headless_seconds: f32,
    #[serde(default = "default_headless_frame_rate")]
    pub headless_frame_rate: u32,
    /// RNG seed. Overrides `sim.session.seed` when set.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Trees scattered over the terrain chunk at startup.
    #[serde(default = "default_tree_count")]
    pub tree_count: usize,
    #[serde(default)]
    pub models: ModelPaths,
    #[serde(default)]
    pub sim: SimConfig,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_headless_seconds() -> f32 {
    30.0
}
fn default_headless_frame_rate() -> u32 {
    60
}
fn default_tree_count() -> usize {
    500
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            headless: false,
            headless_seconds: default_headless_seconds(),
            headless_frame_rate: default_headless_frame_rate(),
            seed: None,
            tree_count: default_tree_count(),
            models: ModelPaths::default(),
            sim: SimConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::try_load_from(&path) {
            Ok(c) => {
                log::info!("Loaded config from {:?}", path);
                c
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Simulation tuning with the top-level seed applied.
    pub fn sim_config(&self) -> SimConfig {
        let mut sim = self.sim.clone();
        if self.seed.is_some() {
            sim.session.seed = self.seed;
        }
        sim
    }

    /// Fixed frame length for headless runs.
    pub fn headless_dt(&self) -> f32 {
        1.0 / self.headless_frame_rate.max(1) as f32
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
