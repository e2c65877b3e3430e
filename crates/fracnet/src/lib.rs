//! Stochastic 2D fracture networks and their intersections.
//!
//! Pipeline
//! - `sampler`: named distributions for orientation, length, and spacing.
//! - `placement`: scan-line sweep producing candidate fracture centers.
//! - `assemble`: per-set sampling, placement, and downsampling into
//!   `FractureSet`s, collected into a `FractureMap`.
//! - `intersect`: bounding-circle-pruned pairwise segment crossings.
//! - `summary`: per-set statistics and structural parity between maps.
//!
//! Every random draw goes through an explicitly passed `rand::Rng`; the same
//! seed and the same call order reproduce the same map.

pub mod api;
pub mod assemble;
pub mod error;
pub mod geom2;
pub mod intersect;
pub mod placement;
pub mod sampler;
pub mod summary;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use assemble::{FractureMap, FractureSet, SamplingCfg, SetConfig};
pub use error::{FractureError, Result};
pub use geom2::{Canvas, Point2, Segment};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::assemble::{
        generate_set, CapacityShortfall, FractureMap, FractureSet, SamplingCfg, SetConfig,
    };
    pub use crate::error::FractureError;
    pub use crate::geom2::{centroid, deg_to_rad, standardize_theta, Canvas, Point2, Segment};
    pub use crate::intersect::{find_intersections, map_intersections, IntersectionReport};
    pub use crate::placement::PlacementLimits;
}
