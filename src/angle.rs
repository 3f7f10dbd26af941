// angle.rs: 角度换算与回绕

use std::f32::consts::PI;

/// Normalizes a difference in degrees into `(-180, 180]`.
///
/// Compass headings wrap at 0/360, so `350 - 10` must read as `-20`
/// rather than `340`.
pub fn wrap_degrees_180(delta: f32) -> f32 {
    if !delta.is_finite() {
        return delta;
    }
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid 落在 [-180, 180)，把 -180 翻到 +180
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (PI / 180.0)
}

pub fn rad_to_deg(rad: f32) -> f32 {
    rad * (180.0 / PI)
}
