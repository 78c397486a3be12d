//! Sun placement over the day and the directional light it drives.
//!
//! [`SunLight`] is the sun's world position and tint for a given hour.
//! [`DirectionalLight`] is what the rendering surface consumes, and
//! [`SceneLightingUniform`] packs it together with ambient and sky values
//! for a uniform buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use homestead_config::{DayNightConfig, rgb_from_hex};

use crate::lighting::LightingState;

/// Sun position and tint at an hour of the day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLight {
    /// World-space position, `distance` away from the origin in the XZ
    /// circle. Height never drops below the ground plane.
    pub position: Vec3,
    /// Linear RGB tint.
    pub color: Vec3,
}

impl SunLight {
    /// Place the sun for `hour`. The angle is zero at 06:00 and PI at 18:00.
    pub fn at_hour(hour: f32, config: &DayNightConfig) -> Self {
        let angle = (hour - 6.0) * (std::f32::consts::PI / 12.0);
        let (sin, cos) = angle.sin_cos();
        let distance = config.sun_distance;
        let position = Vec3::new(cos * distance, (sin * distance).max(0.0), sin * distance);

        let color = if (6.0..=18.0).contains(&hour) {
            rgb_from_hex(config.sun_day_color)
        } else {
            rgb_from_hex(config.sun_dusk_color)
        };

        Self { position, color }
    }
}

/// CPU-side directional light description.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction vector pointing FROM the sun toward the origin.
    pub direction: Vec3,
    /// Linear RGB color of the light (not premultiplied by intensity).
    pub color: Vec3,
    /// Scalar intensity multiplier.
    pub intensity: f32,
}

impl DirectionalLight {
    /// Build the light for a sun position. A sun sitting at the origin
    /// falls back to straight down.
    pub fn from_sun(sun: &SunLight, intensity: f32) -> Self {
        let direction = (-sun.position).try_normalize().unwrap_or(Vec3::NEG_Y);
        Self {
            direction,
            color: sun.color,
            intensity,
        }
    }
}

/// GPU-side lighting block, 48 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneLightingUniform {
    /// xyz = sun direction (normalized), w = sun intensity.
    pub sun_direction_intensity: [f32; 4],
    /// xyz = sun color, w = ambient intensity.
    pub sun_color_ambient: [f32; 4],
    /// xyz = sky clear color, w = padding.
    pub sky_color_padding: [f32; 4],
}

impl SceneLightingUniform {
    pub fn new(sun: &DirectionalLight, lighting: &LightingState) -> Self {
        Self {
            sun_direction_intensity: [
                sun.direction.x,
                sun.direction.y,
                sun.direction.z,
                sun.intensity,
            ],
            sun_color_ambient: [
                sun.color.x,
                sun.color.y,
                sun.color.z,
                lighting.ambient_intensity,
            ],
            sky_color_padding: [
                lighting.sky_color.x,
                lighting.sky_color.y,
                lighting.sky_color.z,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_sun_rises_in_the_east_at_six() {
        let config = DayNightConfig::default();
        let sun = SunLight::at_hour(6.0, &config);
        assert!(approx(sun.position, Vec3::new(50.0, 0.0, 0.0)));
    }

    #[test]
    fn test_sun_overhead_at_noon() {
        let config = DayNightConfig::default();
        let sun = SunLight::at_hour(12.0, &config);
        assert!(approx(sun.position, Vec3::new(0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_sun_height_clamped_at_night() {
        let config = DayNightConfig::default();
        let sun = SunLight::at_hour(0.0, &config);
        assert_eq!(sun.position.y, 0.0);
        assert!(approx(sun.position, Vec3::new(0.0, 0.0, -50.0)));
    }

    #[test]
    fn test_sun_color_switches_at_day_edges() {
        let config = DayNightConfig::default();
        let white = rgb_from_hex(0xffffff);
        let dusk = rgb_from_hex(0xffe5cc);
        assert_eq!(SunLight::at_hour(6.0, &config).color, white);
        assert_eq!(SunLight::at_hour(18.0, &config).color, white);
        assert_eq!(SunLight::at_hour(18.5, &config).color, dusk);
        assert_eq!(SunLight::at_hour(3.0, &config).color, dusk);
    }

    #[test]
    fn test_directional_light_points_at_origin() {
        let config = DayNightConfig::default();
        let sun = SunLight::at_hour(12.0, &config);
        let light = DirectionalLight::from_sun(&sun, 2.0);
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
        assert!(light.direction.y < 0.0);
        assert_eq!(light.intensity, 2.0);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<SceneLightingUniform>(), 48);
        assert_eq!(
            std::mem::offset_of!(SceneLightingUniform, sun_color_ambient),
            16
        );
    }
}
