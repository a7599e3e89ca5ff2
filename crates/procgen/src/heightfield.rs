//! Terrain elevation from three layered sinusoids.
//!
//! The same function drives mesh generation, vegetation placement and ground
//! collision, so every call site sees bit-identical heights. No caching or
//! quantisation is applied anywhere.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Lowest possible terrain elevation (deep water floor).
pub const HEIGHT_FLOOR: f32 = -200.0;

/// Terrain elevation at world (x, z).
///
/// Mountains (period ~2000, amplitude 800) + hills (~500, 150) + roughness
/// (~50, 10), floored at [`HEIGHT_FLOOR`].
#[inline]
pub fn terrain_height(x: f32, z: f32) -> f32 {
    let (x, z) = (x as f64, z as f64);
    let mut y = (x / 2000.0).sin() * (z / 2000.0).cos() * 800.0;
    y += (x / 500.0).sin() * (z / 500.0).sin() * 150.0;
    y += (x / 50.0).sin() * (z / 50.0).cos() * 10.0;
    (y as f32).max(HEIGHT_FLOOR)
}

/// Read-only handle to the terrain elevation, passed to systems that need it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeightField;

impl HeightField {
    pub fn new() -> Self {
        Self
    }

    /// Terrain elevation at world (x, z).
    #[inline]
    pub fn height(&self, x: f32, z: f32) -> f32 {
        terrain_height(x, z)
    }

    /// Elevation directly below a world position.
    #[inline]
    pub fn height_below(&self, position: Vec3) -> f32 {
        self.height(position.x, position.z)
    }

    /// Surface normal from central differences of the height function.
    pub fn normal(&self, x: f32, z: f32) -> Vec3 {
        let e = 1.0;
        let dx = self.height(x - e, z) - self.height(x + e, z);
        let dz = self.height(x, z - e) - self.height(x, z + e);
        Vec3::new(dx, 2.0 * e, dz).normalize()
    }
}

/// Vertex colour for a given elevation: water, grass/earth, rock, snow.
pub fn terrain_color(y: f32) -> [f32; 3] {
    const DEEP_WATER: [f32; 3] = [0.0, 0.133, 0.267];
    const DARK_GREEN: [f32; 3] = [0.0, 0.267, 0.0];
    const EARTH: [f32; 3] = [0.243, 0.153, 0.137];
    const ROCK: [f32; 3] = [0.333, 0.333, 0.333];
    const SNOW: [f32; 3] = [1.0, 1.0, 1.0];

    fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ]
    }

    if y < -100.0 {
        DEEP_WATER
    } else if y < 200.0 {
        lerp(DARK_GREEN, EARTH, (y + 100.0) / 300.0)
    } else if y < 700.0 {
        lerp(EARTH, ROCK, (y - 200.0) / 500.0)
    } else {
        lerp(ROCK, SNOW, (y - 700.0) / 300.0)
    }
}

/// Vertex for terrain mesh (includes height colour).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Configuration for sampling the height field into a mesh.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Side length of the square chunk in world units, centred on the origin.
    pub size: f32,
    /// Quads per side.
    pub segments: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 20000.0,
            segments: 256,
        }
    }
}

/// Sampled terrain chunk ready for upload.
#[derive(Debug)]
pub struct TerrainData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    pub heightmap: Vec<f32>,
    pub config: TerrainConfig,
}

impl TerrainData {
    /// Sample the height field on a regular grid.
    pub fn generate(field: &HeightField, config: TerrainConfig) -> Self {
        let segments = config.segments.max(1);
        let side = segments as usize + 1;
        let step = config.size / segments as f32;
        let half = config.size * 0.5;

        let mut vertices = Vec::with_capacity(side * side);
        let mut heightmap = Vec::with_capacity(side * side);
        for iz in 0..side {
            for ix in 0..side {
                let x = -half + ix as f32 * step;
                let z = -half + iz as f32 * step;
                let y = field.height(x, z);
                heightmap.push(y);
                vertices.push(TerrainVertex {
                    position: [x, y, z],
                    normal: field.normal(x, z).to_array(),
                    color: terrain_color(y),
                });
            }
        }

        let mut indices = Vec::with_capacity(segments as usize * segments as usize * 6);
        for iz in 0..segments {
            for ix in 0..segments {
                let tl = iz * (segments + 1) + ix;
                let tr = tl + 1;
                let bl = tl + segments + 1;
                let br = bl + 1;
                indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
            }
        }

        log::debug!(
            "Sampled terrain: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        Self {
            vertices,
            indices,
            heightmap,
            config,
        }
    }
}
