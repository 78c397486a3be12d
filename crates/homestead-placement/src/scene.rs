//! Scene graph model: named nodes with transforms and shareable mesh data.
//!
//! Mesh geometry and materials live behind `Arc`s so a structural clone of a
//! node shares them with the original. [`SceneGraph`] owns placed root
//! objects and hands out [`ObjectHandle`]s.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

/// Local translation, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Vertex positions and triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Axis-aligned box of full `size`, centered on the local origin.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                )
            })
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 1, 2, 3, // -Z
            4, 5, 6, 5, 7, 6, // +Z
            0, 1, 4, 1, 5, 4, // -Y
            2, 6, 3, 3, 6, 7, // +Y
            0, 4, 2, 2, 4, 6, // -X
            1, 3, 5, 3, 7, 5, // +X
        ];
        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Surface description of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Linear RGB base color.
    pub base_color: Vec3,
}

/// Renderable mesh data attached to a node.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub geometry: Arc<Geometry>,
    /// One or more materials (multi-material meshes keep their order).
    pub materials: Vec<Arc<Material>>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshInstance {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry: Arc::new(geometry),
            materials: vec![Arc::new(material)],
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// A node in an object hierarchy.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshInstance>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// An empty node with no mesh.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: MeshInstance) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Visit this node and every descendant, depth first, parent before child.
    pub fn traverse<F: FnMut(&SceneNode)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.traverse(f);
        }
    }

    /// Mutable variant of [`traverse`](Self::traverse).
    pub fn traverse_mut<F: FnMut(&mut SceneNode)>(&mut self, f: &mut F) {
        f(self);
        for child in &mut self.children {
            child.traverse_mut(f);
        }
    }

    /// Visit every node together with its world matrix, taking `parent` as
    /// the matrix of this node's parent.
    pub fn traverse_world<F: FnMut(&SceneNode, Mat4)>(&self, parent: Mat4, f: &mut F) {
        let world = parent * self.transform.to_matrix();
        f(self, world);
        for child in &self.children {
            child.traverse_world(world, f);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }

    /// World-space origin of every mesh-bearing node, in traversal order.
    pub fn mesh_world_positions(&self) -> Vec<Vec3> {
        let mut positions = Vec::new();
        self.traverse_world(Mat4::IDENTITY, &mut |node, world| {
            if node.mesh.is_some() {
                positions.push(world.transform_point3(Vec3::ZERO));
            }
        });
        positions
    }

    /// Set both shadow flags on every mesh in the hierarchy.
    pub fn set_shadows(&mut self, cast: bool, receive: bool) {
        self.traverse_mut(&mut |node| {
            if let Some(mesh) = node.mesh.as_mut() {
                mesh.cast_shadow = cast;
                mesh.receive_shadow = receive;
            }
        });
    }
}

/// Stable identifier of a root object placed in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// Where placed objects go.
pub trait Scene {
    /// Take ownership of `node` as a new root object.
    fn insert(&mut self, node: SceneNode) -> ObjectHandle;

    /// Root transform of a placed object, if it is still in the scene.
    fn transform_mut(&mut self, handle: ObjectHandle) -> Option<&mut Transform>;
}

/// Flat store of root objects keyed by handle.
#[derive(Debug, Default)]
pub struct SceneGraph {
    next_id: u64,
    objects: FxHashMap<ObjectHandle, SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneNode> {
        self.objects.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneNode> {
        self.objects.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneNode> {
        self.objects.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneNode)> {
        let mut entries: Vec<_> = self.objects.iter().map(|(h, n)| (*h, n)).collect();
        entries.sort_by_key(|(h, _)| *h);
        entries.into_iter()
    }

    pub fn mesh_count(&self) -> usize {
        self.objects.values().map(SceneNode::mesh_count).sum()
    }
}

impl Scene for SceneGraph {
    fn insert(&mut self, node: SceneNode) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.objects.insert(handle, node);
        handle
    }

    fn transform_mut(&mut self, handle: ObjectHandle) -> Option<&mut Transform> {
        self.objects.get_mut(&handle).map(|node| &mut node.transform)
    }
}
