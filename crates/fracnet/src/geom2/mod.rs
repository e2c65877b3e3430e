//! Planar primitives for fracture maps.
//!
//! Purpose
//! - Hold the small vocabulary shared by placement and intersection:
//!   `Canvas`, `Segment`, `Bounds2`, and angle helpers.
//! - Keep endpoints derived from `(center, θ, length)` so the three stay
//!   consistent by construction.

mod types;
mod util;

pub use types::{Bounds2, Canvas, Point2, Segment};
pub use util::{centroid, deg_to_rad, standardize_theta};

#[cfg(test)]
mod tests;
