//! Color conversion between panel values and shader uniforms

use glam::Vec3;

/// Linearly map `value` from `[in_min, in_max]` to `[out_min, out_max]`
///
/// No clamping; a degenerate input range maps everything to `out_min`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if (in_max - in_min).abs() < f32::EPSILON {
        return out_min;
    }
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Convert an 8-bit RGB triple into a 0-1 shader color
pub fn map_color(rgb: [u8; 3]) -> Vec3 {
    Vec3::from_array(rgb.map(|c| map_range(c as f32, 0.0, 255.0, 0.0, 1.0)))
}

/// Convert a 0-1 color back to 8-bit RGB, clamping out-of-range channels
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    color
        .to_array()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
