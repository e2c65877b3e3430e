//! Pairwise segment intersection between fracture sets.
//!
//! Per pair: bounding-circle rejection first (squared center distance against
//! `0.25·(len₁+len₂)²`), then the exact crossing of the two supporting lines,
//! accepted only strictly inside both segments' axis-aligned bounds. Touching
//! at an endpoint is therefore not a crossing, and neither is any contact with
//! an axis-parallel segment (its bounds have an empty interior).

use serde::{Deserialize, Serialize};

use crate::assemble::FractureMap;
use crate::geom2::{Point2, Segment};

/// Supporting line `a·x + b·y = c` through two points.
#[derive(Clone, Copy, Debug)]
struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    fn through(p: Point2, q: Point2) -> Self {
        let a = p.y - q.y;
        let b = q.x - p.x;
        Self {
            a,
            b,
            c: a * p.x + b * p.y,
        }
    }

    /// Crossing point; `None` for parallel or coincident lines.
    fn meet(&self, other: &Line) -> Option<Point2> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0.0 {
            return None;
        }
        Some(Point2::new(
            (self.c * other.b - other.c * self.b) / det,
            (self.a * other.c - other.a * self.c) / det,
        ))
    }
}

/// Necessary condition for two segments to touch.
#[inline]
pub fn may_touch(s: &Segment, t: &Segment) -> bool {
    let d2 = (s.center - t.center).norm_squared();
    let reach = s.length + t.length;
    d2 <= 0.25 * reach * reach
}

/// Crossing point of two finite segments, if any.
pub fn segment_intersection(s: &Segment, t: &Segment) -> Option<Point2> {
    if !may_touch(s, t) {
        return None;
    }
    let (p1, p2) = s.endpoints();
    let (q1, q2) = t.endpoints();
    let x = Line::through(p1, p2).meet(&Line::through(q1, q2))?;
    (s.bounds().contains_strict(x) && t.bounds().contains_strict(x)).then_some(x)
}

/// All crossings between segments of `a` and segments of `b`.
///
/// Points come out in `a`-major order; the point set does not depend on the
/// argument order.
pub fn find_intersections(a: &[Segment], b: &[Segment]) -> Vec<Point2> {
    let mut out = Vec::new();
    for s in a {
        for t in b {
            if let Some(x) = segment_intersection(s, t) {
                out.push(x);
            }
        }
    }
    out
}

/// Crossing count for one unordered set pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    pub a: String,
    pub b: String,
    pub count: usize,
}

/// Crossings between every pair of distinct sets of one map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntersectionReport {
    pub points: Vec<Point2>,
    pub per_pair: Vec<PairCount>,
}

impl IntersectionReport {
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }
}

/// Compare sets `i < j` pairwise (never a set against itself).
pub fn map_intersections(map: &FractureMap) -> IntersectionReport {
    let segments: Vec<Vec<Segment>> = map.sets.iter().map(|s| s.segments()).collect();
    let mut report = IntersectionReport::default();
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let pts = find_intersections(&segments[i], &segments[j]);
            report.per_pair.push(PairCount {
                a: map.sets[i].name.clone(),
                b: map.sets[j].name.clone(),
                count: pts.len(),
            });
            report.points.extend(pts);
        }
    }
    tracing::debug!(
        sets = segments.len(),
        count = report.count(),
        "map intersections"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{SamplingCfg, SetConfig};
    use crate::geom2::Canvas;
    use nalgebra::vector;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::FRAC_PI_4;

    fn sorted(mut v: Vec<Point2>) -> Vec<Point2> {
        v.sort_by(|p, q| {
            p.x.partial_cmp(&q.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(p.y.partial_cmp(&q.y).unwrap_or(std::cmp::Ordering::Equal))
        });
        v
    }

    #[test]
    fn crossing_diagonals_meet_once_at_center() {
        let a = Segment::from_endpoints(vector![0.0, 0.0], vector![10.0, 10.0]);
        let b = Segment::from_endpoints(vector![0.0, 10.0], vector![10.0, 0.0]);
        let pts = find_intersections(&[a], &[b]);
        assert_eq!(pts.len(), 1);
        assert!((pts[0] - vector![5.0, 5.0]).norm() < 1e-9);
    }

    #[test]
    fn distant_parallel_segments_do_not_meet() {
        let a = Segment::new(vector![10.0, 10.0], FRAC_PI_4, 2.0);
        let b = Segment::new(vector![50.0, 50.0], FRAC_PI_4, 2.0);
        assert!(!may_touch(&a, &b));
        assert!(find_intersections(&[a], &[b]).is_empty());
    }

    #[test]
    fn parallel_lines_are_not_reported() {
        let a = Segment::new(vector![2.0, 0.0], 0.0, 4.0);
        let offset = Segment::new(vector![3.0, 0.5], 0.0, 4.0);
        let coincident = Segment::new(vector![3.0, 0.0], 0.0, 4.0);
        assert!(may_touch(&a, &offset));
        assert!(segment_intersection(&a, &offset).is_none());
        assert!(segment_intersection(&a, &coincident).is_none());
    }

    #[test]
    fn axis_parallel_segment_has_no_interior() {
        // Geometrically these cross at (5,5), but the horizontal segment's
        // bounds are flat, so the strict box test rejects the point.
        let diag = Segment::from_endpoints(vector![0.0, 0.0], vector![10.0, 10.0]);
        let flat = Segment::new(vector![5.0, 5.0], 0.0, 10.0);
        assert!(segment_intersection(&diag, &flat).is_none());
    }

    #[test]
    fn lines_cross_outside_finite_extent() {
        // Supporting lines meet at (3,3): inside the first segment only.
        let a = Segment::from_endpoints(vector![0.0, 0.0], vector![4.0, 4.0]);
        let b = Segment::from_endpoints(vector![4.5, 1.5], vector![7.0, -1.0]);
        assert!(may_touch(&a, &b));
        assert!(segment_intersection(&a, &b).is_none());
    }

    #[test]
    fn map_driver_counts_each_set_pair_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let canvas = Canvas::new(60.0, 60.0).unwrap();
        let configs = vec![
            SetConfig::new("set1", 3.0, 70.0, 50, 6.0),
            SetConfig::new("set2", 3.0, 140.0, 50, 9.0),
            SetConfig::new("set3", 5.0, 100.0, 50, 3.0),
        ];
        let map =
            FractureMap::generate(&mut rng, canvas, &configs, &SamplingCfg::default()).unwrap();
        let report = map_intersections(&map);
        assert_eq!(report.per_pair.len(), 3);
        assert_eq!(
            report.per_pair.iter().map(|p| p.count).sum::<usize>(),
            report.count()
        );
        let s0 = map.sets[0].segments();
        let s1 = map.sets[1].segments();
        assert_eq!(report.per_pair[0].count, find_intersections(&s0, &s1).len());
        let first = &report.per_pair[0];
        assert_eq!((first.a.as_str(), first.b.as_str()), ("set1", "set2"));
    }

    fn arb_segment() -> impl Strategy<Value = Segment> {
        (0.0f64..20.0, 0.0f64..20.0, -3.2f64..3.2, 0.1f64..15.0)
            .prop_map(|(x, y, t, l)| Segment::new(vector![x, y], t, l))
    }

    proptest! {
        #[test]
        fn argument_order_does_not_matter(
            a in proptest::collection::vec(arb_segment(), 0..12),
            b in proptest::collection::vec(arb_segment(), 0..12),
        ) {
            let ab = sorted(find_intersections(&a, &b));
            let ba = sorted(find_intersections(&b, &a));
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn far_apart_pairs_never_intersect(
            s in arb_segment(),
            t in 0.0f64..6.3,
            l in 0.1f64..15.0,
            gap in 0.001f64..50.0,
        ) {
            // Place the second center beyond the combined half-lengths.
            let dist = 0.5 * (s.length + l) + gap;
            let c = s.center + vector![dist * t.cos(), dist * t.sin()];
            let other = Segment::new(c, t, l);
            prop_assert!(!may_touch(&s, &other));
            prop_assert!(segment_intersection(&s, &other).is_none());
        }

        #[test]
        fn accepted_points_lie_inside_both_bounds(s in arb_segment(), t in arb_segment()) {
            if let Some(x) = segment_intersection(&s, &t) {
                prop_assert!(s.bounds().contains_strict(x));
                prop_assert!(t.bounds().contains_strict(x));
            }
        }
    }
}
