//! Flat re-export surface for drivers and bindings.
//!
//! Mirrors the pipeline order: sample → place → assemble → intersect → compare.

pub use crate::sampler::{
    apply_length_floor, sample_length, sample_orientation, sample_spacing, LengthDist,
    OrientationDist, SpacingDist, LENGTH_FLOOR,
};

pub use crate::placement::{
    generate_centers, CandidatePool, PlacementLimits, PlacementRequest, Regime,
};

pub use crate::assemble::{
    generate_set, CapacityShortfall, FractureMap, FractureSet, SamplingCfg, SetConfig,
};

pub use crate::intersect::{
    find_intersections, map_intersections, may_touch, segment_intersection, IntersectionReport,
    PairCount,
};

pub use crate::summary::{axial_mean, check_parity, compare_maps, MapSummary, SetDelta, SetSummary};

pub use crate::geom2::{centroid, deg_to_rad, standardize_theta, Bounds2, Canvas, Point2, Segment};

/// Reference map: 60×60 canvas, five sets.
pub fn reference_configs() -> (Canvas, Vec<SetConfig>) {
    (
        Canvas {
            width: 60.0,
            height: 60.0,
        },
        vec![
            SetConfig::new("set1", 3.0, 70.0, 50, 6.0),
            SetConfig::new("set2", 3.0, 140.0, 50, 9.0),
            SetConfig::new("set3", 5.0, 100.0, 50, 3.0),
            SetConfig::new("set4", 4.0, 30.0, 50, 18.0),
            SetConfig::new("set5", 9.0, 10.0, 50, 12.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn reference_pipeline_end_to_end() {
        let (canvas, configs) = reference_configs();
        let mut rng = StdRng::seed_from_u64(5);
        let map =
            FractureMap::generate(&mut rng, canvas, &configs, &SamplingCfg::default()).unwrap();
        let report = map_intersections(&map);
        // Five sets → ten unordered pairs.
        assert_eq!(report.per_pair.len(), 10);
        assert!(report.count() > 0);
        let summary = MapSummary::of(&map);
        assert_eq!(summary.sets.len(), 5);
        assert!(check_parity(&map, &map).is_ok());
    }

    #[test]
    fn map_serializes_to_json() {
        let (canvas, configs) = reference_configs();
        let mut rng = StdRng::seed_from_u64(9);
        let map = FractureMap::generate(&mut rng, canvas, &configs[..1], &SamplingCfg::default())
            .unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let back: FractureMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sets[0].len(), map.sets[0].len());
        assert_eq!(back.canvas, map.canvas);
    }
}
