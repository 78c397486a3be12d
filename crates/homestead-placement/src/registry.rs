//! Prefab registry: collections of named, clonable object groups.
//!
//! A collection mirrors one loaded model file. Every named group inside it is
//! addressable as `(collection, node)`. The registry keeps the canonical
//! graphs; placements always receive clones.

use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Geometry, Material, MeshInstance, SceneNode, Transform};

/// Errors returned while building a registry from a manifest.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O error reading the manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Two prefabs with the same name in one collection.
    #[error("duplicate prefab {name:?} in collection {collection:?}")]
    DuplicatePrefab { collection: String, name: String },

    /// A prefab without any parts.
    #[error("prefab {0:?} has no parts")]
    EmptyPrefab(String),
}

/// Lookup of prefab templates by collection and node name.
pub trait AssetRegistry {
    fn find_node(&self, collection: &str, name: &str) -> Option<&SceneNode>;
}

// ---------------------------------------------------------------------------
// RON manifest types
// ---------------------------------------------------------------------------

/// Top-level prefab manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabManifest {
    pub collections: Vec<CollectionDef>,
}

/// One collection of prefabs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDef {
    pub name: String,
    pub prefabs: Vec<PrefabDef>,
}

/// A prefab assembled from box parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabDef {
    pub name: String,
    pub parts: Vec<PartDef>,
}

/// A single box mesh inside a prefab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDef {
    pub name: String,
    /// Full box size.
    pub size: (f32, f32, f32),
    /// Local offset of the box center.
    #[serde(default)]
    pub offset: (f32, f32, f32),
    /// XYZ Euler rotation in radians.
    #[serde(default)]
    pub rotation: (f32, f32, f32),
    /// Base color, `0xRRGGBB`.
    pub color: u32,
}

impl PrefabDef {
    fn build(&self) -> SceneNode {
        let mut group = SceneNode::group(self.name.clone());
        for part in &self.parts {
            let (sx, sy, sz) = part.size;
            let (ox, oy, oz) = part.offset;
            let (rx, ry, rz) = part.rotation;
            let mesh = MeshInstance::new(
                Geometry::cuboid(Vec3::new(sx, sy, sz)),
                Material {
                    name: part.name.clone(),
                    base_color: homestead_config::rgb_from_hex(part.color),
                },
            );
            group.children.push(
                SceneNode::group(part.name.clone())
                    .with_transform(Transform {
                        translation: Vec3::new(ox, oy, oz),
                        rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
                        scale: Vec3::ONE,
                    })
                    .with_mesh(mesh),
            );
        }
        group
    }
}

// ---------------------------------------------------------------------------
// PrefabRegistry
// ---------------------------------------------------------------------------

/// Two-level map: collection name -> node name -> prefab graph.
#[derive(Debug, Default)]
pub struct PrefabRegistry {
    collections: FxHashMap<String, FxHashMap<String, SceneNode>>,
}

impl PrefabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the registry from a RON manifest file on disk.
    pub fn from_ron(path: &Path) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load the registry from a RON manifest string.
    pub fn from_ron_str(contents: &str) -> Result<Self, RegistryError> {
        let manifest: PrefabManifest = ron::from_str(contents)?;
        Self::from_manifest(&manifest)
    }

    pub fn from_manifest(manifest: &PrefabManifest) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for collection in &manifest.collections {
            for prefab in &collection.prefabs {
                if prefab.parts.is_empty() {
                    return Err(RegistryError::EmptyPrefab(prefab.name.clone()));
                }
                if registry.find_node(&collection.name, &prefab.name).is_some() {
                    return Err(RegistryError::DuplicatePrefab {
                        collection: collection.name.clone(),
                        name: prefab.name.clone(),
                    });
                }
                registry.insert_node(&collection.name, &prefab.name, prefab.build());
            }
        }
        Ok(registry)
    }

    /// Index every named group (a named node with children) under `root` as
    /// a collection. Later nodes win on name clashes. Returns the number of
    /// groups indexed.
    pub fn insert_collection(&mut self, collection: &str, root: &SceneNode) -> usize {
        let mut groups = FxHashMap::default();
        root.traverse(&mut |node| {
            if !node.name.is_empty() && !node.children.is_empty() {
                groups.insert(node.name.clone(), node.clone());
            }
        });
        let count = groups.len();
        self.collections.insert(collection.to_string(), groups);
        count
    }

    /// Add or replace one prefab.
    pub fn insert_node(&mut self, collection: &str, name: &str, node: SceneNode) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(name.to_string(), node);
    }

    /// Collection names, sorted.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Node names inside a collection, sorted. Empty for unknown collections.
    pub fn node_names(&self, collection: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .collections
            .get(collection)
            .map(|nodes| nodes.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn prefab_count(&self) -> usize {
        self.collections.values().map(|nodes| nodes.len()).sum()
    }

    /// Log every collection and its node names at info level.
    pub fn log_contents(&self) {
        log::info!("Available prefab collections:");
        for collection in self.collection_names() {
            log::info!("  {collection}: {}", self.node_names(collection).join(", "));
        }
    }
}

impl AssetRegistry for PrefabRegistry {
    fn find_node(&self, collection: &str, name: &str) -> Option<&SceneNode> {
        self.collections.get(collection)?.get(name)
    }
}
