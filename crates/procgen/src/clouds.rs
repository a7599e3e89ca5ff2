//! Cloud layer: sprite-puff clusters drifting with a constant wind.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Layout parameters for the cloud layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Side of the square area clouds are scattered over.
    pub range: f32,
    /// Mean cluster altitude.
    pub altitude: f32,
    /// Number of clusters.
    pub cluster_count: usize,
    /// Wind velocity applied to every cluster.
    pub wind: Vec3,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            range: 20000.0,
            altitude: 1500.0,
            cluster_count: 100,
            wind: Vec3::new(10.0, 0.0, 0.0),
        }
    }
}

/// A single billboard puff, offset from its cluster centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPuff {
    pub offset: Vec3,
    pub scale: f32,
}

/// A group of puffs sharing a centre.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudCluster {
    pub center: Vec3,
    pub puffs: Vec<CloudPuff>,
}

impl CloudCluster {
    /// World positions of every puff.
    pub fn puff_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.puffs.iter().map(move |p| self.center + p.offset)
    }
}

/// All clusters plus the wind that moves them.
#[derive(Debug, Clone)]
pub struct CloudField {
    pub clusters: Vec<CloudCluster>,
    wind: Vec3,
}

impl CloudField {
    pub fn generate<R: Rng>(config: &CloudConfig, rng: &mut R) -> Self {
        let mut clusters = Vec::with_capacity(config.cluster_count);
        for _ in 0..config.cluster_count {
            let center = Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.range,
                config.altitude + (rng.gen::<f32>() - 0.5) * 400.0,
                (rng.gen::<f32>() - 0.5) * config.range,
            );
            let puff_count = 5 + rng.gen_range(0..10);
            let puffs = (0..puff_count)
                .map(|_| CloudPuff {
                    // Flatter than wide.
                    offset: Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 400.0,
                        (rng.gen::<f32>() - 0.5) * 100.0,
                        (rng.gen::<f32>() - 0.5) * 400.0,
                    ),
                    scale: 200.0 + rng.gen::<f32>() * 300.0,
                })
                .collect();
            clusters.push(CloudCluster { center, puffs });
        }
        Self {
            clusters,
            wind: config.wind,
        }
    }

    /// Drift every cluster with the wind.
    pub fn update(&mut self, dt: f32) {
        let drift = self.wind * dt;
        for cluster in &mut self.clusters {
            cluster.center += drift;
        }
    }

    pub fn puff_count(&self) -> usize {
        self.clusters.iter().map(|c| c.puffs.len()).sum()
    }
}
