//! Drag-and-drop object placement onto the farm ground.
//!
//! Screen pointers become camera rays, rays resolve to a contact point on the
//! ground, and prefabs from the [`PrefabRegistry`] are cloned into the
//! [`SceneGraph`] at that point. Livestock get a deep clone with independent
//! geometry and materials; everything else shares prefab data. Palette drops
//! grow in with a back-out scale tween.

mod camera;
mod clone;
mod palette;
mod registry;
mod resolver;
mod scene;
mod static_builder;
mod surface;
mod tween;

pub use camera::{Camera, Projection, Ray, Viewport};
pub use clone::{CloneKind, deep_clone};
pub use palette::{DragState, DropIntent, Palette, PaletteEntry};
pub use registry::{
    AssetRegistry, CollectionDef, PartDef, PrefabDef, PrefabManifest, PrefabRegistry, RegistryError,
};
pub use resolver::{
    DropSource, HeightRule, PlaceOptions, PlacementContext, PlacementRequest, PlacementResolver,
};
pub use scene::{
    Geometry, Material, MeshInstance, ObjectHandle, Scene, SceneGraph, SceneNode, Transform,
};
pub use static_builder::{GridOrigin, GridScatter, LevelLayout, StaticBuilder, StaticProp};
pub use surface::{GroundBox, GroundPlane, RaycastTarget};
pub use tween::{Easing, ScaleTween, TweenSet};

