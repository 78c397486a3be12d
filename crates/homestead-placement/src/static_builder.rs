//! Static level dressing: hand-placed props plus tree and grass grids.

use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::registry::{AssetRegistry, RegistryError};
use crate::scene::SceneNode;

/// One hand-placed prop. Unset fields keep the prefab's own transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticProp {
    pub collection: String,
    pub node: String,
    #[serde(default)]
    pub position: Option<(f32, f32, f32)>,
    /// XYZ Euler angles in radians.
    #[serde(default)]
    pub rotation: Option<(f32, f32, f32)>,
    #[serde(default)]
    pub scale: Option<(f32, f32, f32)>,
}

/// Where cell `(0, 0)` of a scatter grid sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridOrigin {
    /// World XZ of the first cell.
    Corner(f32, f32),
    /// Center the whole grid on the world origin.
    Centered,
}

/// Occupancy grid filled with randomly chosen prefabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridScatter {
    pub collection: String,
    /// Candidate prefab names, one picked per occupied cell.
    pub prefabs: Vec<String>,
    /// Rows along Z, columns along X. Cells equal to 1 are occupied.
    pub grid: Vec<Vec<u8>>,
    pub cell_size: f32,
    pub origin: GridOrigin,
    pub height: f32,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl GridScatter {
    /// World XZ of cell `(row, col)`.
    pub fn cell_position(&self, row: usize, col: usize) -> (f32, f32) {
        let (x0, z0) = match self.origin {
            GridOrigin::Corner(x, z) => (x, z),
            GridOrigin::Centered => {
                let cols = self.grid.first().map_or(0, Vec::len);
                (
                    -(cols as f32 * self.cell_size) / 2.0,
                    -(self.grid.len() as f32 * self.cell_size) / 2.0,
                )
            }
        };
        (
            x0 + col as f32 * self.cell_size,
            z0 + row as f32 * self.cell_size,
        )
    }
}

/// Everything static in a level, loaded from RON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub statics: Vec<StaticProp>,
    #[serde(default)]
    pub trees: Option<GridScatter>,
    #[serde(default)]
    pub grass: Option<GridScatter>,
    /// Seed for grid prefab choice.
    #[serde(default)]
    pub seed: u64,
}

impl LevelLayout {
    pub fn from_ron(path: &Path) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, RegistryError> {
        Ok(ron::from_str(contents)?)
    }
}

/// Clones static props out of a registry.
pub struct StaticBuilder<'a> {
    registry: &'a dyn AssetRegistry,
}

impl<'a> StaticBuilder<'a> {
    pub fn new(registry: &'a dyn AssetRegistry) -> Self {
        Self { registry }
    }

    /// Clone every prop that resolves. Props cast shadows but do not
    /// receive them. Missing prefabs are logged and skipped.
    pub fn build(&self, props: &[StaticProp]) -> Vec<SceneNode> {
        let mut built = Vec::with_capacity(props.len());
        for prop in props {
            let Some(prefab) = self.registry.find_node(&prop.collection, &prop.node) else {
                log::warn!(
                    "Could not find prefab {:?} in collection {:?}",
                    prop.node,
                    prop.collection
                );
                continue;
            };
            let mut node = prefab.clone();
            if let Some((x, y, z)) = prop.position {
                node.transform.translation = Vec3::new(x, y, z);
            }
            if let Some((x, y, z)) = prop.rotation {
                node.transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
            }
            if let Some((x, y, z)) = prop.scale {
                node.transform.scale = Vec3::new(x, y, z);
            }
            node.set_shadows(true, false);
            built.push(node);
        }
        built
    }

    /// Fill every occupied cell of `scatter` with a random candidate prefab.
    /// Candidates missing from the registry are left out of the draw.
    pub fn scatter(&self, scatter: &GridScatter, rng: &mut ChaCha8Rng) -> Vec<SceneNode> {
        let candidates: Vec<&SceneNode> = scatter
            .prefabs
            .iter()
            .filter_map(|name| {
                let found = self.registry.find_node(&scatter.collection, name);
                if found.is_none() {
                    log::warn!("Scatter prefab {name:?} missing from {:?}", scatter.collection);
                }
                found
            })
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut placed = Vec::new();
        for (row, cells) in scatter.grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell != 1 {
                    continue;
                }
                let pick = candidates[rng.random_range(0..candidates.len())];
                let mut node = pick.clone();
                let (x, z) = scatter.cell_position(row, col);
                node.transform.translation = Vec3::new(x, scatter.height, z);
                node.set_shadows(scatter.cast_shadows, scatter.receive_shadows);
                placed.push(node);
            }
        }
        placed
    }

    /// Statics, then trees, then grass.
    pub fn build_level(&self, layout: &LevelLayout, rng: &mut ChaCha8Rng) -> Vec<SceneNode> {
        let mut nodes = self.build(&layout.statics);
        for grid in [&layout.trees, &layout.grass].into_iter().flatten() {
            nodes.extend(self.scatter(grid, rng));
        }
        nodes
    }
}
