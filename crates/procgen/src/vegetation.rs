//! Tree scatter over the height field.

use glam::Vec3;
use rand::Rng;

use crate::heightfield::HeightField;

/// Trees only grow in this elevation band (shoreline to treeline).
pub const TREE_MIN_HEIGHT: f32 = -50.0;
pub const TREE_MAX_HEIGHT: f32 = 300.0;
/// Placement attempts per requested tree.
const ATTEMPTS_PER_TREE: usize = 3;

/// One placed tree, pivot at the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeInstance {
    pub position: Vec3,
    pub scale: f32,
}

/// Scatter up to `count` trees over a square chunk of side `chunk_size`
/// centred on the origin. Rejected spots (outside the grass band) are not
/// retried beyond the attempt budget, so fewer trees may come back.
pub fn scatter_trees<R: Rng>(
    field: &HeightField,
    count: usize,
    chunk_size: f32,
    rng: &mut R,
) -> Vec<TreeInstance> {
    let mut trees = Vec::with_capacity(count);
    for _ in 0..count * ATTEMPTS_PER_TREE {
        if trees.len() >= count {
            break;
        }
        let x = (rng.gen::<f32>() - 0.5) * chunk_size;
        let z = (rng.gen::<f32>() - 0.5) * chunk_size;
        let height = field.height(x, z);
        if height > TREE_MIN_HEIGHT && height < TREE_MAX_HEIGHT {
            trees.push(TreeInstance {
                position: Vec3::new(x, height, z),
                scale: 1.0 + rng.gen::<f32>(),
            });
        }
    }
    log::debug!("Placed {}/{} trees", trees.len(), count);
    trees
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn trees_sit_on_the_grass_band() {
        let field = HeightField::new();
        let mut rng = StdRng::seed_from_u64(7);
        let trees = scatter_trees(&field, 500, 20000.0, &mut rng);
        assert!(!trees.is_empty());
        assert!(trees.len() <= 500);
        for tree in &trees {
            let ground = field.height(tree.position.x, tree.position.z);
            assert_eq!(tree.position.y, ground);
            assert!(ground > TREE_MIN_HEIGHT && ground < TREE_MAX_HEIGHT);
            assert!((1.0..=2.0).contains(&tree.scale));
            assert!(tree.position.x.abs() <= 10000.0 && tree.position.z.abs() <= 10000.0);
        }
    }

    #[test]
    fn zero_count_places_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(scatter_trees(&HeightField::new(), 0, 1000.0, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_forest() {
        let field = HeightField::new();
        let a = scatter_trees(&field, 50, 5000.0, &mut StdRng::seed_from_u64(99));
        let b = scatter_trees(&field, 50, 5000.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
