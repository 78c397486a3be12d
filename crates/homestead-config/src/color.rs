//! Conversions for the `0xRRGGBB` colors stored in config and asset files.

use glam::Vec3;

/// Convert `0xRRGGBB` to an RGB vector in `[0, 1]`.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32;
    let g = ((hex >> 8) & 0xff) as f32;
    let b = (hex & 0xff) as f32;
    Vec3::new(r, g, b) / 255.0
}

/// Convert an RGB vector in `[0, 1]` to `0xRRGGBB`, clamping each channel.
pub fn hex_from_rgb(color: Vec3) -> u32 {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | c.z as u32
}
