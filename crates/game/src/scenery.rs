//! Static world built once at startup: sampled terrain and scattered trees.

use procgen::{scatter_trees, HeightField, TerrainConfig, TerrainData, TreeInstance};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Scenery {
    pub terrain: TerrainData,
    pub trees: Vec<TreeInstance>,
}

impl Scenery {
    pub fn build(field: &HeightField, terrain: TerrainConfig, tree_count: usize, seed: Option<u64>) -> Self {
        let chunk_size = terrain.size;
        let terrain = TerrainData::generate(field, terrain);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trees = scatter_trees(field, tree_count, chunk_size, &mut rng);
        log::info!(
            "Scenery: {} terrain vertices, {} trees",
            terrain.vertices.len(),
            trees.len()
        );
        Self { terrain, trees }
    }
}
