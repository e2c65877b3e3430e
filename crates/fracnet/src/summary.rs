//! Per-set summaries and structural parity between maps.
//!
//! Comparison layers need two maps with the same canvas and the same number
//! of sets. `check_parity` reports a mismatch as `IncompatibleMaps`;
//! `compare_maps` downgrades it to a warning and returns `None`.

use serde::{Deserialize, Serialize};

use crate::assemble::{FractureMap, FractureSet};
use crate::error::{FractureError, Result};
use crate::geom2::{centroid, standardize_theta, Canvas, Point2};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    pub name: String,
    pub count: usize,
    pub spacing: f64,
    pub mean_length: f64,
    pub min_length: f64,
    pub max_length: f64,
    /// Axial mean orientation in `[0, π)`.
    pub mean_orientation: f64,
    pub centroid: Option<Point2>,
}

impl SetSummary {
    pub fn of(set: &FractureSet) -> Self {
        let n = set.lengths.len();
        let (min_length, max_length, sum) = set.lengths.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, s), &l| (lo.min(l), hi.max(l), s + l),
        );
        Self {
            name: set.name.clone(),
            count: set.len(),
            spacing: set.spacing,
            mean_length: if n > 0 { sum / n as f64 } else { 0.0 },
            min_length: if n > 0 { min_length } else { 0.0 },
            max_length: if n > 0 { max_length } else { 0.0 },
            mean_orientation: axial_mean(&set.orientations),
            centroid: centroid(&set.centers),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSummary {
    pub canvas: Canvas,
    pub fractures: usize,
    pub sets: Vec<SetSummary>,
}

impl MapSummary {
    pub fn of(map: &FractureMap) -> Self {
        Self {
            canvas: map.canvas,
            fractures: map.fracture_count(),
            sets: map.sets.iter().map(SetSummary::of).collect(),
        }
    }
}

/// Set-by-set difference `b − a`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetDelta {
    pub a: String,
    pub b: String,
    pub count: i64,
    pub mean_length: f64,
    /// Smallest axial difference, in `[0, π/2]`.
    pub orientation: f64,
    pub spacing: f64,
}

/// Mean of doubled angles, halved back: θ and θ+π count as the same direction.
pub fn axial_mean(thetas: &[f64]) -> f64 {
    if thetas.is_empty() {
        return 0.0;
    }
    let (s, c) = thetas.iter().fold((0.0, 0.0), |(s, c), &t| {
        (s + (2.0 * t).sin(), c + (2.0 * t).cos())
    });
    standardize_theta(0.5 * s.atan2(c))
}

fn axial_distance(a: f64, b: f64) -> f64 {
    let d = standardize_theta(a - b);
    d.min(std::f64::consts::PI - d)
}

/// Same canvas and same number of sets.
pub fn check_parity(a: &FractureMap, b: &FractureMap) -> Result<()> {
    if a.canvas != b.canvas {
        return Err(FractureError::incompatible(format!(
            "canvas {}×{} vs {}×{}",
            a.canvas.width, a.canvas.height, b.canvas.width, b.canvas.height
        )));
    }
    if a.sets.len() != b.sets.len() {
        return Err(FractureError::incompatible(format!(
            "{} sets vs {} sets",
            a.sets.len(),
            b.sets.len()
        )));
    }
    Ok(())
}

/// Pair sets by position and report their differences, or `None` (with a
/// warning) when the maps lack parity.
pub fn compare_maps(a: &FractureMap, b: &FractureMap) -> Option<Vec<SetDelta>> {
    if let Err(err) = check_parity(a, b) {
        tracing::warn!(%err, "map comparison skipped");
        return None;
    }
    let deltas = a
        .sets
        .iter()
        .zip(&b.sets)
        .map(|(sa, sb)| {
            let (x, y) = (SetSummary::of(sa), SetSummary::of(sb));
            SetDelta {
                a: x.name,
                b: y.name,
                count: y.count as i64 - x.count as i64,
                mean_length: y.mean_length - x.mean_length,
                orientation: axial_distance(y.mean_orientation, x.mean_orientation),
                spacing: y.spacing - x.spacing,
            }
        })
        .collect();
    Some(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{SamplingCfg, SetConfig};
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::PI;

    fn map(seed: u64, canvas: Canvas, configs: &[SetConfig]) -> FractureMap {
        let mut rng = StdRng::seed_from_u64(seed);
        FractureMap::generate(&mut rng, canvas, configs, &SamplingCfg::default()).unwrap()
    }

    #[test]
    fn axial_mean_folds_opposite_directions() {
        let m = axial_mean(&[0.1, 0.1 + PI]);
        assert!((m - 0.1).abs() < 1e-12);
        // Straddling 0/π: mean is horizontal, not vertical.
        let m = axial_mean(&[0.05, PI - 0.05]);
        assert!(m.min(PI - m) < 1e-12);
        assert_eq!(axial_mean(&[]), 0.0);
    }

    #[test]
    fn summary_tracks_set_statistics() {
        let configs = [SetConfig::new("set1", 3.0, 70.0, 50, 6.0)];
        let m = map(5, Canvas::new(60.0, 60.0).unwrap(), &configs);
        let s = MapSummary::of(&m);
        assert_eq!(s.fractures, 50);
        let set = &s.sets[0];
        assert_eq!(set.count, 50);
        assert!(set.min_length <= set.mean_length && set.mean_length <= set.max_length);
        assert!((set.mean_length - 6.0).abs() < 1.5);
        // Fisher dispersion 0.1 is wide; only check the range.
        assert!((0.0..PI).contains(&set.mean_orientation));
        assert!(set.centroid.is_some());
    }

    #[test]
    fn parity_requires_canvas_and_group_count() {
        let c60 = Canvas::new(60.0, 60.0).unwrap();
        let two = [
            SetConfig::new("a", 3.0, 70.0, 20, 6.0),
            SetConfig::new("b", 4.0, 20.0, 20, 6.0),
        ];
        let one = [SetConfig::new("a", 3.0, 70.0, 20, 6.0)];
        let m1 = map(1, c60, &two);
        let m2 = map(2, c60, &two);
        let m3 = map(3, c60, &one);
        let m4 = map(4, Canvas::new(50.0, 60.0).unwrap(), &two);

        assert!(check_parity(&m1, &m2).is_ok());
        assert!(matches!(
            check_parity(&m1, &m3),
            Err(FractureError::IncompatibleMaps { .. })
        ));
        assert!(check_parity(&m1, &m4).is_err());

        assert!(compare_maps(&m1, &m3).is_none());
        let deltas = compare_maps(&m1, &m2).unwrap();
        assert_eq!(deltas.len(), 2);
        assert!(deltas.iter().all(|d| (0.0..=PI / 2.0).contains(&d.orientation)));
        assert_eq!(deltas[0].spacing, 0.0);
    }
}
