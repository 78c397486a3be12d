//! Period lighting targets and the smoothed lighting state that chases them.

use glam::Vec3;
use homestead_config::{DayNightConfig, Smoothing, rgb_from_hex};

use crate::period::Period;

/// Lerp factor for one tick of `dt` seconds.
///
/// `FixedFactor` ignores `dt`, so the approach speed depends on frame rate.
pub fn smoothing_factor(smoothing: Smoothing, dt: f32) -> f32 {
    match smoothing {
        Smoothing::FixedFactor(f) => f.clamp(0.0, 1.0),
        Smoothing::Exponential { rate } => 1.0 - (-rate.max(0.0) * dt.max(0.0)).exp(),
    }
}

/// The values lighting converges to while a period is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingTargets {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub sky_color: Vec3,
}

impl LightingTargets {
    /// Targets for `period`. Sunrise and Sunset sit halfway between the
    /// night and day intensities.
    pub fn for_period(period: Period, config: &DayNightConfig) -> Self {
        let ambient = config.ambient_intensity;
        let directional = config.directional_intensity;
        let sky = config.sky_colors;
        let (ambient_intensity, directional_intensity, sky_hex) = match period {
            Period::Day => (ambient.day, directional.day, sky.day),
            Period::Night => (ambient.night, directional.night, sky.night),
            Period::Sunrise => (
                lerp(ambient.night, ambient.day, 0.5),
                lerp(directional.night, directional.day, 0.5),
                sky.sunrise,
            ),
            Period::Sunset => (
                lerp(ambient.day, ambient.night, 0.5),
                lerp(directional.day, directional.night, 0.5),
                sky.sunset,
            ),
        };
        Self {
            ambient_intensity,
            directional_intensity,
            sky_color: rgb_from_hex(sky_hex),
        }
    }
}

/// Current smoothed lighting values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub sky_color: Vec3,
}

impl LightingState {
    /// A state sitting exactly on `targets`.
    pub fn at(targets: LightingTargets) -> Self {
        Self {
            ambient_intensity: targets.ambient_intensity,
            directional_intensity: targets.directional_intensity,
            sky_color: targets.sky_color,
        }
    }

    /// Move every channel independently toward `targets` by `factor`.
    pub fn approach(&mut self, targets: &LightingTargets, factor: f32) {
        self.ambient_intensity = lerp(self.ambient_intensity, targets.ambient_intensity, factor);
        self.directional_intensity = lerp(
            self.directional_intensity,
            targets.directional_intensity,
            factor,
        );
        self.sky_color = self.sky_color.lerp(targets.sky_color, factor);
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
