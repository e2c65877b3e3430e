use std::f64::consts::PI;

use super::types::Point2;

/// Degrees to radians, computed as `deg/360 · 2π` so that 90° maps exactly
/// onto `π/2` (the vertical scan-line regime compares against it).
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg / 360.0 * 2.0 * PI
}

/// Fold an axial angle into `[0, π)`: θ and θ+π describe the same line.
///
/// Non-finite input is returned unchanged.
pub fn standardize_theta(theta: f64) -> f64 {
    if !theta.is_finite() {
        return theta;
    }
    let t = theta.rem_euclid(PI);
    // rem_euclid can round up to exactly π for tiny negative inputs.
    if t >= PI {
        0.0
    } else {
        t
    }
}

/// Arithmetic mean of a point cloud (the map's "gravity center").
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point2::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}
