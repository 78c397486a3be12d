//! Clone selection for placed prefabs.

use std::sync::Arc;

use glam::Vec3;

use crate::scene::{MeshInstance, SceneNode, Transform};

/// How a prefab is copied into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneKind {
    /// Structural copy sharing geometry and materials with the prefab.
    Shallow,
    /// Flattened copy with independent geometry and materials per mesh.
    Deep,
}

impl CloneKind {
    /// Deep for any id containing one of the `livestock` fragments.
    pub fn for_object(object_id: &str, livestock: &[String]) -> Self {
        if livestock
            .iter()
            .any(|fragment| !fragment.is_empty() && object_id.contains(fragment.as_str()))
        {
            CloneKind::Deep
        } else {
            CloneKind::Shallow
        }
    }

    pub fn apply(self, prefab: &SceneNode, deep_offset: Vec3) -> SceneNode {
        match self {
            CloneKind::Shallow => prefab.clone(),
            CloneKind::Deep => deep_clone(prefab, deep_offset),
        }
    }
}

/// Rebuild `prefab` as a flat group with one child per mesh-bearing node.
///
/// The hierarchy and every ancestor transform are dropped. Each child gets
/// `offset` as its translation, keeps its own local rotation, and resets to
/// unit scale. Children always cast shadows and copy the receive flag.
pub fn deep_clone(prefab: &SceneNode, offset: Vec3) -> SceneNode {
    let mut group = SceneNode::group(prefab.name.clone());
    prefab.traverse(&mut |node| {
        let Some(mesh) = node.mesh.as_ref() else {
            return;
        };
        let copy = MeshInstance {
            geometry: Arc::new(mesh.geometry.as_ref().clone()),
            materials: mesh
                .materials
                .iter()
                .map(|m| Arc::new(m.as_ref().clone()))
                .collect(),
            cast_shadow: true,
            receive_shadow: mesh.receive_shadow,
        };
        group.children.push(SceneNode {
            name: node.name.clone(),
            transform: Transform {
                translation: offset,
                rotation: node.transform.rotation,
                scale: Vec3::ONE,
            },
            mesh: Some(copy),
            children: Vec::new(),
        });
    });
    group
}
