//! World assembly and the headless frame loop.

use bevy_ecs::prelude::*;
use glam::Vec3;
use homestead_config::Config;
use homestead_daynight::{EventQueue, TimeSimulation};
use homestead_placement::{
    Camera, DropIntent, GroundBox, LevelLayout, PlacementRequest, PlacementResolver,
    PrefabRegistry, Scene, SceneGraph, StaticBuilder, TweenSet, Viewport,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::hud::HudState;
use crate::resources::{
    DayNight, DebugControl, FrameTime, Hud, PendingDrops, Placement, SoundCues, TimeEvents,
};
use crate::systems::frame_schedule;

/// Center of the farm's ground slab.
pub const GROUND_CENTER: Vec3 = Vec3::new(-1.0, -10.0, 0.0);
/// Full size of the farm's ground slab.
pub const GROUND_SIZE: Vec3 = Vec3::new(40.0, 1.0, 40.0);

/// The farm's ground slab. Its top face sits at y = -9.5.
pub fn farm_ground() -> GroundBox {
    GroundBox::new(GROUND_CENTER, GROUND_SIZE)
}

/// Populate `world` with every resource the frame systems read.
///
/// The static level from `layout` is built into the scene up front.
pub fn register_game_resources(
    world: &mut World,
    config: &Config,
    registry: PrefabRegistry,
    layout: &LevelLayout,
) {
    if config.debug.log_prefabs {
        registry.log_contents();
    }

    let mut scene = SceneGraph::new();
    let mut rng = ChaCha8Rng::seed_from_u64(layout.seed);
    let statics = StaticBuilder::new(&registry).build_level(layout, &mut rng);
    let static_count = statics.len();
    for node in statics {
        scene.insert(node);
    }
    info!("Built {static_count} static level objects");

    let viewport = Viewport::new(config.window.width as f32, config.window.height as f32);
    let mut hud = HudState::default();
    let day_night = TimeSimulation::new(config.day_night.clone());
    hud.refresh(&day_night);

    world.insert_resource(FrameTime::default());
    world.insert_resource(DayNight(day_night));
    world.insert_resource(TimeEvents(EventQueue::new()));
    world.insert_resource(Placement {
        resolver: PlacementResolver::new(config.placement.clone()),
        registry,
        scene,
        tweens: TweenSet::new(),
        camera: Camera::from_config(&config.camera, viewport),
        viewport,
        ground: Some(farm_ground()),
    });
    world.insert_resource(PendingDrops::default());
    world.insert_resource(SoundCues::default());
    world.insert_resource(DebugControl::default());
    world.insert_resource(Hud(hud));
}

/// A world plus the schedule that advances it one frame at a time.
pub struct Game {
    world: World,
    schedule: Schedule,
}

impl Game {
    pub fn new(config: &Config, registry: PrefabRegistry, layout: &LevelLayout) -> Self {
        let mut world = World::new();
        register_game_resources(&mut world, config, registry, layout);
        Self {
            world,
            schedule: frame_schedule(),
        }
    }

    /// Run one frame of `delta` real seconds.
    pub fn run_frame(&mut self, delta: f32) {
        {
            let mut time = self.world.resource_mut::<FrameTime>();
            time.delta = delta.max(0.0);
            time.elapsed += time.delta;
            time.frame += 1;
        }
        self.schedule.run(&mut self.world);
    }

    /// Run `frames` frames at a fixed `delta`.
    pub fn run_frames(&mut self, frames: u32, delta: f32) {
        for _ in 0..frames {
            self.run_frame(delta);
        }
    }

    /// Queue a drop for the next frame.
    pub fn queue_drop(&mut self, request: PlacementRequest) {
        self.world.resource_mut::<PendingDrops>().push_request(request);
    }

    /// Queue a finished palette drag for the next frame.
    pub fn queue_intent(&mut self, intent: DropIntent) {
        self.world.resource_mut::<PendingDrops>().push_intent(intent);
    }

    pub fn debug_control(&mut self) -> Mut<'_, DebugControl> {
        self.world.resource_mut::<DebugControl>()
    }

    pub fn day_night(&self) -> &TimeSimulation {
        &self.world.resource::<DayNight>().0
    }

    pub fn hud(&self) -> &HudState {
        &self.world.resource::<Hud>().0
    }

    pub fn placement(&self) -> &Placement {
        self.world.resource::<Placement>()
    }

    pub fn sound_cues(&self) -> &[String] {
        &self.world.resource::<SoundCues>().0
    }

    pub fn frame_time(&self) -> &FrameTime {
        self.world.resource::<FrameTime>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};
    use homestead_placement::{DragState, DropSource, Palette, Projection};

    const PREFABS: &str = r#"(collections: [
        (name: "objects", prefabs: [
            (name: "cow", parts: [
                (name: "body", size: (1.6, 1.0, 0.8), offset: (0.0, 0.9, 0.0), color: 0xffffff),
                (name: "head", size: (0.5, 0.5, 0.5), offset: (0.9, 1.3, 0.0), color: 0x222222),
            ]),
            (name: "corn_2", parts: [
                (name: "stalk", size: (0.2, 1.5, 0.2), offset: (0.0, 0.75, 0.0), color: 0x88aa22),
            ]),
        ]),
        (name: "ground", prefabs: [
            (name: "fence", parts: [(name: "rail", size: (8.0, 1.0, 0.2), color: 0x8b5a2b)]),
        ]),
    ])"#;

    const LEVEL: &str = r#"(
        statics: [
            (collection: "ground", node: "fence", position: Some((-20.0, -9.5, 0.0))),
            (collection: "ground", node: "fence", position: Some((18.0, -9.5, 0.0))),
        ],
        seed: 3,
    )"#;

    fn game(config: &Config) -> Game {
        let registry = PrefabRegistry::from_ron_str(PREFABS).unwrap();
        let layout = LevelLayout::from_ron_str(LEVEL).unwrap();
        Game::new(config, registry, &layout)
    }

    /// Camera straight above the origin so the viewport center hits (0, y, 0).
    fn top_down(game: &mut Game) {
        let mut placement = game.world.resource_mut::<Placement>();
        placement.camera.position = Vec3::new(0.0, 50.0, 0.0);
        placement.camera.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        placement.camera.projection = Projection::Perspective {
            fov_y: 20f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
        };
    }

    #[test]
    fn test_world_starts_with_static_level() {
        let game = game(&Config::default());
        assert_eq!(game.placement().scene.len(), 2);
        assert_eq!(game.hud().time_text, "06:00");
        assert_eq!(game.hud().period_text, "DAY");
        assert_eq!(game.frame_time().frame, 0);
    }

    #[test]
    fn test_frames_advance_clock_and_hud() {
        let mut game = game(&Config::default());
        // Each half-second frame is 0.04 in-game hours.
        game.run_frames(26, 0.5);
        assert!((game.day_night().current_hour() - 7.04).abs() < 1e-3);
        assert_eq!(game.hud().time_text, "07:02");
        assert_eq!(game.frame_time().frame, 26);
        assert!((game.frame_time().elapsed - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_palette_drag_places_and_grows_livestock() {
        let mut game = game(&Config::default());
        top_down(&mut game);

        let palette = Palette::default();
        let mut drag = DragState::new();
        drag.begin(palette.get("cow").unwrap(), Vec2::new(400.0, 20.0));
        drag.update(Vec2::new(900.0, 500.0));
        game.queue_intent(drag.end(Vec2::new(960.0, 540.0)).unwrap());

        game.run_frame(0.0);
        let placement = game.placement();
        assert_eq!(placement.scene.len(), 3);
        let (handle, cow) = placement.scene.iter().last().unwrap();
        assert_eq!(cow.name, "cow");
        assert!((cow.transform.translation.y - (-9.99)).abs() < 1e-4);
        assert_eq!(cow.transform.scale, Vec3::ZERO);
        assert!(placement.tweens.is_animating(handle));
        assert_eq!(game.sound_cues(), ["cow".to_string()]);

        game.run_frames(5, 0.5);
        let placement = game.placement();
        assert_eq!(placement.scene.get(handle).unwrap().transform.scale, Vec3::ONE);
        assert!(placement.tweens.is_empty());
    }

    #[test]
    fn test_window_drop_and_misses() {
        let mut game = game(&Config::default());
        top_down(&mut game);
        game.queue_drop(PlacementRequest {
            object_id: "corn_2".into(),
            screen: Vec2::new(960.0, 540.0),
            source: DropSource::Window,
        });
        game.queue_drop(PlacementRequest {
            object_id: "pig".into(),
            screen: Vec2::new(960.0, 540.0),
            source: DropSource::Window,
        });
        game.run_frame(0.0);

        let placement = game.placement();
        assert_eq!(placement.scene.len(), 3);
        let (_, corn) = placement.scene.iter().last().unwrap();
        assert!((corn.transform.translation.y - (-9.49)).abs() < 1e-4);
        assert!(game.sound_cues().is_empty());
    }

    #[test]
    fn test_debug_controls_apply_next_frame() {
        let mut game = game(&Config::default());
        assert!(game.debug_control().quick_jump("6 PM (Dusk)"));
        assert!(!game.debug_control().quick_jump("teatime"));
        game.debug_control().set_time_scale(50.0);
        game.run_frame(0.0);

        assert_eq!(game.day_night().current_hour(), 18.0);
        assert_eq!(game.day_night().time_scale(), 10.0);
        assert_eq!(game.hud().period_text, "DAY");
    }

    #[test]
    fn test_shipped_assets_cover_palette_and_level() {
        let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let registry = PrefabRegistry::from_ron(&assets.join("prefabs.ron")).unwrap();
        let layout = LevelLayout::from_ron(&assets.join("level.ron")).unwrap();

        use homestead_placement::AssetRegistry;
        for entry in Palette::default().entries() {
            assert!(registry.find_node("objects", &entry.id).is_some(), "{}", entry.id);
        }
        // 22 fences and a bucket, 13 trees, 50 grass tufts.
        let game = Game::new(&Config::default(), registry, &layout);
        assert_eq!(game.placement().scene.len(), 23 + 13 + 50);
    }

    #[test]
    fn test_day_rollover_reaches_hud() {
        let mut config = Config::default();
        config.day_night.start_hour = 23.5;
        let mut game = game(&config);
        // 300 s per day: 7.5 s is 0.6 hours.
        game.run_frame(7.5);
        assert_eq!(game.day_night().day_number(), 2);
        assert_eq!(game.hud().day_number, 2);
        assert_eq!(game.hud().period_text, "NIGHT");
    }
}
