//! ECS resources shared by the frame systems.

use bevy_ecs::prelude::*;
use homestead_daynight::{EventQueue, TimeSimulation};
use homestead_placement::{
    Camera, DropIntent, GroundBox, PlacementRequest, PlacementResolver, PrefabRegistry,
    SceneGraph, TweenSet, Viewport,
};

use crate::hud::HudState;

/// Frame timing, written by the loop before the schedule runs.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameTime {
    /// Real seconds since the previous frame.
    pub delta: f32,
    /// Real seconds since startup.
    pub elapsed: f32,
    pub frame: u64,
}

/// The day/night clock.
#[derive(Resource, Debug)]
pub struct DayNight(pub TimeSimulation);

/// Time events raised this frame, drained by the HUD system.
#[derive(Resource, Debug, Default)]
pub struct TimeEvents(pub EventQueue);

/// Everything a drop is resolved against, plus the objects it produced.
#[derive(Resource)]
pub struct Placement {
    pub resolver: PlacementResolver,
    pub registry: PrefabRegistry,
    pub scene: SceneGraph,
    pub tweens: TweenSet,
    pub camera: Camera,
    pub viewport: Viewport,
    /// `None` until the level has built its ground.
    pub ground: Option<GroundBox>,
}

#[derive(Debug, Clone)]
pub struct PendingDrop {
    pub request: PlacementRequest,
    /// Sound cue to play if the drop lands.
    pub sound: Option<String>,
}

/// Drop gestures waiting for the next frame.
#[derive(Resource, Debug, Default)]
pub struct PendingDrops(pub Vec<PendingDrop>);

impl PendingDrops {
    pub fn push_request(&mut self, request: PlacementRequest) {
        self.0.push(PendingDrop {
            request,
            sound: None,
        });
    }

    pub fn push_intent(&mut self, intent: DropIntent) {
        let sound = Some(intent.sound.clone());
        self.0.push(PendingDrop {
            request: intent.into_request(),
            sound,
        });
    }
}

/// Sound cues requested by landed drops, oldest first. Playback happens
/// outside the simulation.
#[derive(Resource, Debug, Default)]
pub struct SoundCues(pub Vec<String>);

/// Debug clock controls applied at the start of the next frame.
#[derive(Resource, Debug, Default)]
pub struct DebugControl {
    pub jump_to: Option<f32>,
    pub time_scale: Option<f32>,
}

impl DebugControl {
    /// Quick-jump presets: label and hour.
    pub const QUICK_JUMPS: [(&'static str, f32); 4] = [
        ("6 AM (Dawn)", 6.0),
        ("12 PM (Noon)", 12.0),
        ("6 PM (Dusk)", 18.0),
        ("12 AM (Midnight)", 0.0),
    ];

    /// Time scale slider range.
    pub const TIME_SCALE_RANGE: (f32, f32) = (0.0, 10.0);

    /// Queue a jump to the preset with `label`. Returns false for unknown labels.
    pub fn quick_jump(&mut self, label: &str) -> bool {
        match Self::QUICK_JUMPS.iter().find(|(l, _)| *l == label) {
            Some(&(_, hour)) => {
                self.jump_to = Some(hour);
                true
            }
            None => false,
        }
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        let (min, max) = Self::TIME_SCALE_RANGE;
        self.time_scale = Some(scale.clamp(min, max));
    }
}

/// Current HUD contents.
#[derive(Resource, Debug, Default)]
pub struct Hud(pub HudState);
