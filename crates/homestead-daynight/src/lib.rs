//! Day/night cycle: a continuous 24-hour clock, lighting period
//! classification, smoothed light intensities and sky color, sun placement,
//! and time events for HUD and gameplay consumers.

mod events;
mod lighting;
mod period;
mod simulation;
mod sun;

pub use events::{EventQueue, EventSink, TimeEvent};
pub use lighting::{LightingState, LightingTargets, smoothing_factor};
pub use period::Period;
pub use simulation::TimeSimulation;
pub use sun::{DirectionalLight, SceneLightingUniform, SunLight};
