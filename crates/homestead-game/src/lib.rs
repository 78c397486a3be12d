//! Homestead composition root: a `bevy_ecs` world that runs the day/night
//! clock, placement tweens, queued drops, and the clock HUD once per frame.

mod app;
mod hud;
mod resources;
mod systems;

pub use app::{GROUND_CENTER, GROUND_SIZE, Game, farm_ground, register_game_resources};
pub use hud::{HudState, format_hud};
pub use resources::{
    DayNight, DebugControl, FrameTime, Hud, PendingDrop, PendingDrops, Placement, SoundCues,
    TimeEvents,
};
pub use systems::{
    FrameSet, advance_clock, apply_debug_controls, apply_drops, configure_frame_ordering,
    frame_schedule, refresh_hud, tick_tweens,
};
