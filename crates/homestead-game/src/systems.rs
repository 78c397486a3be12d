//! Per-frame systems and their ordering.

use bevy_ecs::prelude::*;
use homestead_daynight::TimeEvent;
use homestead_placement::{PlacementContext, RaycastTarget};
use tracing::{debug, info, warn};

use crate::resources::{
    DayNight, DebugControl, FrameTime, Hud, PendingDrops, Placement, SoundCues, TimeEvents,
};

/// Frame stages, run top to bottom.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Apply queued debug clock controls.
    Controls,
    /// Advance the day/night clock.
    Clock,
    /// Step running scale tweens.
    Tweens,
    /// Resolve queued drops into scene objects.
    Drops,
    /// Consume this frame's time events.
    Hud,
}

/// Configure ordering constraints for the frame schedule.
pub fn configure_frame_ordering(schedule: &mut Schedule) {
    schedule.configure_sets((
        FrameSet::Controls.before(FrameSet::Clock),
        FrameSet::Clock.before(FrameSet::Tweens),
        FrameSet::Tweens.before(FrameSet::Drops),
        FrameSet::Drops.before(FrameSet::Hud),
    ));
}

/// Build the frame schedule with every system in its set.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    configure_frame_ordering(&mut schedule);
    schedule.add_systems((
        apply_debug_controls.in_set(FrameSet::Controls),
        advance_clock.in_set(FrameSet::Clock),
        tick_tweens.in_set(FrameSet::Tweens),
        apply_drops.in_set(FrameSet::Drops),
        refresh_hud.in_set(FrameSet::Hud),
    ));
    schedule
}

pub fn apply_debug_controls(mut control: ResMut<DebugControl>, mut day_night: ResMut<DayNight>) {
    if let Some(hour) = control.jump_to.take() {
        day_night.0.set_time(hour);
        info!("Clock set to {}", day_night.0.formatted_time());
    }
    if let Some(scale) = control.time_scale.take() {
        day_night.0.set_time_scale(scale);
        info!("Time scale set to {scale}");
    }
}

pub fn advance_clock(
    time: Res<FrameTime>,
    mut day_night: ResMut<DayNight>,
    mut events: ResMut<TimeEvents>,
) {
    day_night.0.advance(time.delta, &mut events.0);
}

pub fn tick_tweens(time: Res<FrameTime>, mut placement: ResMut<Placement>) {
    let placement = &mut *placement;
    placement.tweens.tick(time.delta, &mut placement.scene);
}

pub fn apply_drops(
    mut drops: ResMut<PendingDrops>,
    mut placement: ResMut<Placement>,
    mut cues: ResMut<SoundCues>,
) {
    if drops.0.is_empty() {
        return;
    }
    let placement = &mut *placement;
    let mut ctx = PlacementContext {
        camera: &placement.camera,
        viewport: placement.viewport,
        ground: placement.ground.as_ref().map(|g| g as &dyn RaycastTarget),
        registry: &placement.registry,
        scene: &mut placement.scene,
        tweens: &mut placement.tweens,
    };
    for drop in drops.0.drain(..) {
        match placement.resolver.resolve_drop(&drop.request, &mut ctx) {
            Some(handle) => {
                info!(
                    "Placed {} ({:?} drop) as {handle:?}",
                    drop.request.object_id, drop.request.source
                );
                if let Some(sound) = drop.sound {
                    debug!("Sound cue {sound}");
                    cues.0.push(sound);
                }
            }
            None => warn!(
                "Drop of {} at ({}, {}) placed nothing",
                drop.request.object_id, drop.request.screen.x, drop.request.screen.y
            ),
        }
    }
}

pub fn refresh_hud(
    mut events: ResMut<TimeEvents>,
    day_night: Res<DayNight>,
    mut hud: ResMut<Hud>,
) {
    for event in events.0.drain() {
        match event {
            TimeEvent::Dawn { .. } => info!("Dawn breaks at {}", day_night.0.formatted_time()),
            TimeEvent::Dusk { .. } => info!("Dusk falls at {}", day_night.0.formatted_time()),
            TimeEvent::DayRollover { day_number } => info!("Day {day_number} begins"),
            _ => {}
        }
        hud.0.handle_event(&event, &day_night.0);
    }
}
