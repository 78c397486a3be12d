//! Drop resolution: pointer position to a placed, shadowed scene object.

use glam::{Vec2, Vec3};
use homestead_config::PlacementConfig;

use crate::camera::{Camera, Viewport};
use crate::clone::CloneKind;
use crate::registry::AssetRegistry;
use crate::scene::{ObjectHandle, Scene};
use crate::surface::RaycastTarget;
use crate::tween::{Easing, ScaleTween, TweenSet};

/// Where a drop gesture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSource {
    /// A native drag-and-drop onto the game window.
    Window,
    /// A drag that started on the object palette.
    Palette,
}

/// One drop gesture, discarded after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub object_id: String,
    /// Pointer position in viewport pixels.
    pub screen: Vec2,
    pub source: DropSource,
}

/// Vertical placement rule for a new object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// Contact point height plus the surface offset.
    AbovePoint,
    /// The given anchor height plus the surface offset.
    AboveAnchor(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceOptions {
    pub height: HeightRule,
    pub animate_in: bool,
}

/// Collaborators a drop is resolved against.
pub struct PlacementContext<'a> {
    pub camera: &'a Camera,
    pub viewport: Viewport,
    /// `None` while the level has no ground yet.
    pub ground: Option<&'a dyn RaycastTarget>,
    pub registry: &'a dyn AssetRegistry,
    pub scene: &'a mut dyn Scene,
    pub tweens: &'a mut TweenSet,
}

/// Turns drop gestures into scene objects.
#[derive(Debug, Clone)]
pub struct PlacementResolver {
    config: PlacementConfig,
}

impl PlacementResolver {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Contact point of the pointer ray with `ground`, or `None` on a miss.
    pub fn resolve_ground_point(
        &self,
        screen: Vec2,
        viewport: Viewport,
        camera: &Camera,
        ground: &dyn RaycastTarget,
    ) -> Option<Vec3> {
        let ray = camera.screen_ray(screen, viewport);
        ground.intersect(&ray)
    }

    pub fn clone_kind(&self, object_id: &str) -> CloneKind {
        CloneKind::for_object(object_id, &self.config.livestock)
    }

    /// Clone prefab `object_id` into `scene` at `point`.
    ///
    /// A missing prefab logs a warning and leaves the scene untouched.
    pub fn place_object(
        &self,
        object_id: &str,
        point: Vec3,
        registry: &dyn AssetRegistry,
        scene: &mut dyn Scene,
        tweens: &mut TweenSet,
        options: PlaceOptions,
    ) -> Option<ObjectHandle> {
        let Some(prefab) = registry.find_node(&self.config.collection, object_id) else {
            log::warn!(
                "Prefab {object_id:?} not found in collection {:?}",
                self.config.collection
            );
            return None;
        };

        let kind = self.clone_kind(object_id);
        let (ox, oy, oz) = self.config.deep_clone_offset;
        let mut object = kind.apply(prefab, Vec3::new(ox, oy, oz));

        let base_y = match options.height {
            HeightRule::AbovePoint => point.y,
            HeightRule::AboveAnchor(anchor) => anchor,
        };
        object.transform.translation = Vec3::new(point.x, base_y + self.config.surface_offset, point.z);
        object.set_shadows(true, true);
        if options.animate_in {
            object.transform.scale = Vec3::ZERO;
        }

        let handle = scene.insert(object);
        log::debug!("Placed {object_id:?} ({kind:?} clone) at {point} as {handle:?}");

        if options.animate_in {
            let tween = ScaleTween::new(
                Vec3::ZERO,
                Vec3::ONE,
                self.config.scale_in_secs,
                Easing::BackOut {
                    overshoot: self.config.back_overshoot,
                },
            );
            tweens.start(handle, tween, scene);
        }
        Some(handle)
    }

    /// Resolve a drop gesture end to end.
    ///
    /// Window drops sit just above the contact point. Palette drops sit on
    /// the ground's anchor height and grow in. No ground or a missed ray
    /// is a silent no-op.
    pub fn resolve_drop(
        &self,
        request: &PlacementRequest,
        ctx: &mut PlacementContext<'_>,
    ) -> Option<ObjectHandle> {
        let ground = ctx.ground?;
        let point = self.resolve_ground_point(request.screen, ctx.viewport, ctx.camera, ground)?;

        let options = match request.source {
            DropSource::Window => PlaceOptions {
                height: HeightRule::AbovePoint,
                animate_in: false,
            },
            DropSource::Palette => PlaceOptions {
                height: HeightRule::AboveAnchor(ground.anchor_height()),
                animate_in: true,
            },
        };
        self.place_object(
            &request.object_id,
            point,
            ctx.registry,
            &mut *ctx.scene,
            &mut *ctx.tweens,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PrefabRegistry;
    use crate::scene::SceneGraph;
    use crate::surface::{GroundBox, GroundPlane};
    use glam::Quat;

    const MANIFEST: &str = r#"(collections: [(name: "objects", prefabs: [
        (name: "cow", parts: [
            (name: "body", size: (1.6, 1.0, 0.8), offset: (0.0, 0.9, 0.0), color: 0xffffff),
        ]),
        (name: "corn_2", parts: [
            (name: "stalk", size: (0.2, 1.5, 0.2), offset: (0.0, 0.75, 0.0), color: 0x88aa22),
        ]),
    ])])"#;

    fn resolver() -> PlacementResolver {
        PlacementResolver::new(PlacementConfig::default())
    }

    fn registry() -> PrefabRegistry {
        PrefabRegistry::from_ron_str(MANIFEST).unwrap()
    }

    fn top_down_camera() -> Camera {
        Camera {
            position: Vec3::new(0.0, 50.0, 0.0),
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        }
    }

    fn window_drop() -> PlaceOptions {
        PlaceOptions {
            height: HeightRule::AbovePoint,
            animate_in: false,
        }
    }

    #[test]
    fn test_resolve_ground_point_center() {
        let viewport = Viewport::new(800.0, 600.0);
        let ground = GroundPlane::infinite(-9.5);
        let point = resolver()
            .resolve_ground_point(Vec2::new(400.0, 300.0), viewport, &top_down_camera(), &ground)
            .unwrap();
        assert!((point - Vec3::new(0.0, -9.5, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_parallel_ray_resolves_nothing() {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = Camera {
            position: Vec3::new(0.0, 5.0, 0.0),
            ..Camera::default()
        };
        let ground = GroundPlane::infinite(0.0);
        let point =
            resolver().resolve_ground_point(Vec2::new(400.0, 300.0), viewport, &camera, &ground);
        assert!(point.is_none());
    }

    #[test]
    fn test_shallow_placement_uses_point() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let point = Vec3::new(3.0, -9.5, 4.0);
        let handle = resolver()
            .place_object("corn_2", point, &registry, &mut scene, &mut tweens, window_drop())
            .unwrap();

        let placed = scene.get(handle).unwrap();
        assert!((placed.transform.translation - Vec3::new(3.0, -9.49, 4.0)).length() < 1e-5);
        let world = placed.mesh_world_positions();
        assert!((world[0] - Vec3::new(3.0, -9.49 + 0.75, 4.0)).length() < 1e-4);
        let mesh = placed.children[0].mesh.as_ref().unwrap();
        assert!(mesh.cast_shadow && mesh.receive_shadow);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_livestock_placement_uses_fixed_offset() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let point = Vec3::new(3.0, -9.5, 4.0);
        let r = resolver();
        let cow = r
            .place_object("cow", point, &registry, &mut scene, &mut tweens, window_drop())
            .unwrap();
        let corn = r
            .place_object("corn_2", point, &registry, &mut scene, &mut tweens, window_drop())
            .unwrap();

        let cow_node = scene.get(cow).unwrap();
        // Deep clones drop the prefab's part offset for a hard-coded one.
        assert_eq!(
            cow_node.children[0].transform.translation,
            Vec3::new(2.0, 0.4, 2.0)
        );
        let cow_world = cow_node.mesh_world_positions()[0];
        let corn_world = scene.get(corn).unwrap().mesh_world_positions()[0];
        assert!((cow_world - Vec3::new(5.0, -9.09, 6.0)).length() < 1e-4);
        assert!((cow_world.x - corn_world.x).abs() > 1.0);
    }

    #[test]
    fn test_missing_prefab_is_a_noop() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let handle = resolver().place_object(
            "pig",
            Vec3::ZERO,
            &registry,
            &mut scene,
            &mut tweens,
            window_drop(),
        );
        assert!(handle.is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_each_placement_is_independent_of_registry() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let handle = resolver()
            .place_object("corn_2", Vec3::ZERO, &registry, &mut scene, &mut tweens, window_drop())
            .unwrap();
        scene.get_mut(handle).unwrap().children.clear();
        let prefab = registry.find_node("objects", "corn_2").unwrap();
        assert_eq!(prefab.children.len(), 1);
        assert!(!prefab.children[0].mesh.as_ref().unwrap().cast_shadow);
    }

    #[test]
    fn test_palette_drop_sits_on_anchor_and_animates() {
        let mut registry = registry();
        let sheep = registry.find_node("objects", "cow").unwrap().clone();
        registry.insert_node("objects", "sheep", sheep);
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let camera = top_down_camera();
        let ground = GroundBox::new(Vec3::new(-1.0, -10.0, 0.0), Vec3::new(40.0, 1.0, 40.0));
        let request = PlacementRequest {
            object_id: "sheep".to_string(),
            screen: Vec2::new(400.0, 300.0),
            source: DropSource::Palette,
        };

        let mut ctx = PlacementContext {
            camera: &camera,
            viewport: Viewport::new(800.0, 600.0),
            ground: Some(&ground),
            registry: &registry,
            scene: &mut scene,
            tweens: &mut tweens,
        };
        let handle = resolver().resolve_drop(&request, &mut ctx).unwrap();

        let placed = scene.get(handle).unwrap();
        assert!((placed.transform.translation.y - (-9.99)).abs() < 1e-5);
        assert_eq!(placed.transform.scale, Vec3::ZERO);
        assert!(tweens.is_animating(handle));

        tweens.tick(2.0, &mut scene);
        assert_eq!(scene.get(handle).unwrap().transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_window_drop_sits_on_contact_point() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let camera = top_down_camera();
        let ground = GroundBox::new(Vec3::new(-1.0, -10.0, 0.0), Vec3::new(40.0, 1.0, 40.0));
        let request = PlacementRequest {
            object_id: "corn_2".to_string(),
            screen: Vec2::new(400.0, 300.0),
            source: DropSource::Window,
        };
        let mut ctx = PlacementContext {
            camera: &camera,
            viewport: Viewport::new(800.0, 600.0),
            ground: Some(&ground),
            registry: &registry,
            scene: &mut scene,
            tweens: &mut tweens,
        };
        let handle = resolver().resolve_drop(&request, &mut ctx).unwrap();
        let placed = scene.get(handle).unwrap();
        assert!((placed.transform.translation.y - (-9.49)).abs() < 1e-4);
        assert_eq!(placed.transform.scale, Vec3::ONE);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_drop_without_ground_or_hit_is_silent() {
        let registry = registry();
        let mut scene = SceneGraph::new();
        let mut tweens = TweenSet::new();
        let camera = top_down_camera();
        let request = PlacementRequest {
            object_id: "corn_2".to_string(),
            screen: Vec2::new(400.0, 300.0),
            source: DropSource::Window,
        };
        let mut ctx = PlacementContext {
            camera: &camera,
            viewport: Viewport::new(800.0, 600.0),
            ground: None,
            registry: &registry,
            scene: &mut scene,
            tweens: &mut tweens,
        };
        assert!(resolver().resolve_drop(&request, &mut ctx).is_none());

        let far_ground = GroundBox::new(Vec3::new(500.0, 0.0, 0.0), Vec3::splat(1.0));
        ctx.ground = Some(&far_ground);
        assert!(resolver().resolve_drop(&request, &mut ctx).is_none());
        assert!(scene.is_empty());
    }
}
