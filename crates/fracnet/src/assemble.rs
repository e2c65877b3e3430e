//! Set assembler: samples + candidate centers → realized fracture sets.
//!
//! Purpose
//! - Draw spacing, orientation, and length pools for one configured set, run
//!   the placement engine, and keep `min(requested, candidates)` fractures.
//! - Hold the realized per-set collections as parallel arrays (orientation,
//!   length, center, endpoints): index `i` is the same fracture in all four.
//!
//! Pairing rule
//! - Selected candidates keep their pool order. The n-th selected center is
//!   paired with the n-th orientation and length sample, not with the sample
//!   at its candidate index. Downstream statistics rely on this exact pairing.
//!
//! Determinism
//! - One RNG handle is threaded through every draw in a fixed order
//!   (spacing, orientation, length, placement, selection); the same seed and
//!   the same configuration sequence reproduce the same map.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, Result};
use crate::geom2::{deg_to_rad, Canvas, Point2, Segment};
use crate::placement::{generate_centers, PlacementLimits, PlacementRequest};
use crate::sampler::{
    apply_length_floor, LengthDist, OrientationDist, SpacingDist, LENGTH_FLOOR,
};

/// Per-set input record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetConfig {
    pub name: String,
    /// Nominal spacing between scan-lines.
    pub spacing: f64,
    /// Target orientation in degrees.
    pub theta: f64,
    /// Requested fracture count.
    pub number: usize,
    /// Nominal length.
    pub length: f64,
}

impl SetConfig {
    pub fn new(
        name: impl Into<String>,
        spacing: f64,
        theta: f64,
        number: usize,
        length: f64,
    ) -> Self {
        Self {
            name: name.into(),
            spacing,
            theta,
            number,
            length,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(FractureError::invalid(format!(
                "set {:?}: spacing must be finite and > 0",
                self.name
            )));
        }
        if !self.theta.is_finite() {
            return Err(FractureError::invalid(format!(
                "set {:?}: theta must be finite",
                self.name
            )));
        }
        if self.number == 0 {
            return Err(FractureError::invalid(format!(
                "set {:?}: number must be > 0",
                self.name
            )));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(FractureError::invalid(format!(
                "set {:?}: length must be finite and > 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Sampling policy shared by all sets of a map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingCfg {
    /// Size of the spacing, orientation, and length sample pools.
    pub pool_size: usize,
    pub orientation: OrientationDist,
    pub orientation_dispersion: f64,
    pub length: LengthDist,
    pub length_dispersion: f64,
    pub spacing: SpacingDist,
    pub spacing_dispersion: f64,
    pub length_floor: f64,
    pub limits: PlacementLimits,
}

impl Default for SamplingCfg {
    fn default() -> Self {
        Self {
            pool_size: 1000,
            orientation: OrientationDist::Fisher,
            orientation_dispersion: 0.1,
            length: LengthDist::Normal,
            length_dispersion: 2.0,
            spacing: SpacingDist::Uniform,
            spacing_dispersion: 2.0,
            length_floor: LENGTH_FLOOR,
            limits: PlacementLimits::default(),
        }
    }
}

impl SamplingCfg {
    pub fn validate(&self) -> Result<()> {
        if self.pool_size < 2 {
            return Err(FractureError::invalid("pool_size must be >= 2"));
        }
        if !(self.length_floor.is_finite() && self.length_floor > 0.0) {
            return Err(FractureError::invalid("length_floor must be finite and > 0"));
        }
        Ok(())
    }
}

/// Soft condition: fewer candidates than requested; the set was clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityShortfall {
    pub requested: usize,
    pub available: usize,
}

/// Realized fracture set. Read-only after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractureSet {
    pub name: String,
    /// Nominal spacing from the configuration.
    pub spacing: f64,
    /// Orientations in radians.
    pub orientations: Vec<f64>,
    pub lengths: Vec<f64>,
    pub centers: Vec<Point2>,
    /// `(endpoint1, endpoint2)` per fracture.
    pub endpoints: Vec<(Point2, Point2)>,
    /// Size of the candidate pool the set was drawn from.
    pub candidates: usize,
    pub shortfall: Option<CapacityShortfall>,
}

impl FractureSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn segment(&self, i: usize) -> Option<Segment> {
        Some(Segment::new(
            *self.centers.get(i)?,
            *self.orientations.get(i)?,
            *self.lengths.get(i)?,
        ))
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.centers
            .iter()
            .zip(&self.orientations)
            .zip(&self.lengths)
            .map(|((&c, &t), &l)| Segment::new(c, t, l))
            .collect()
    }

    #[inline]
    pub fn was_clamped(&self) -> bool {
        self.shortfall.is_some()
    }
}

/// Generate one set on `canvas`.
pub fn generate_set<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SetConfig,
    canvas: &Canvas,
    cfg: &SamplingCfg,
) -> Result<FractureSet> {
    config.validate()?;
    cfg.validate()?;
    canvas.validate()?;
    let pool = cfg.pool_size;
    let theta = deg_to_rad(config.theta);

    let spacing_samples = cfg
        .spacing
        .sample(rng, config.spacing, cfg.spacing_dispersion, pool)?;
    let theta_samples = cfg
        .orientation
        .sample(rng, theta, cfg.orientation_dispersion, pool)?;
    let mut length_samples = cfg
        .length
        .sample(rng, config.length, cfg.length_dispersion, pool)?;
    apply_length_floor(&mut length_samples, cfg.length_floor);

    let req = PlacementRequest {
        theta,
        spacing: config.spacing,
        spacing_samples: &spacing_samples,
        length: config.length,
        length_samples: &length_samples,
    };
    let candidates = generate_centers(rng, &req, canvas, &cfg.limits)?;

    let available = candidates.len();
    let mut number = config.number;
    let mut shortfall = None;
    if number > available {
        tracing::warn!(
            set = %config.name,
            requested = number,
            available,
            "requested count exceeds candidate pool; clamping"
        );
        shortfall = Some(CapacityShortfall {
            requested: number,
            available,
        });
        number = available;
    }
    // Every selected fracture needs its own orientation/length sample.
    let number = number.min(theta_samples.len()).min(length_samples.len());

    let mut picked = index::sample(rng, available, number).into_vec();
    picked.sort_unstable();

    let mut set = FractureSet {
        name: config.name.clone(),
        spacing: config.spacing,
        orientations: Vec::with_capacity(number),
        lengths: Vec::with_capacity(number),
        centers: Vec::with_capacity(number),
        endpoints: Vec::with_capacity(number),
        candidates: available,
        shortfall,
    };
    // The i-th selected center takes the i-th orientation and length sample.
    let samples = theta_samples.iter().zip(&length_samples);
    for (&k, (&theta_i, &length_i)) in picked.iter().zip(samples) {
        let center = Point2::new(candidates.xs[k], candidates.ys[k]);
        let seg = Segment::new(center, theta_i, length_i);
        set.orientations.push(seg.theta);
        set.lengths.push(seg.length);
        set.centers.push(seg.center);
        set.endpoints.push(seg.endpoints());
    }
    tracing::debug!(
        set = %set.name,
        candidates = available,
        realized = set.len(),
        "set generated"
    );
    Ok(set)
}

/// A canvas plus its sets, generated in configuration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractureMap {
    pub canvas: Canvas,
    pub sets: Vec<FractureSet>,
}

impl FractureMap {
    /// Generate every set sequentially with one RNG. An invalid distribution
    /// or parameter aborts the whole map.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        canvas: Canvas,
        configs: &[SetConfig],
        cfg: &SamplingCfg,
    ) -> Result<Self> {
        let sets = configs
            .iter()
            .map(|c| generate_set(rng, c, &canvas, cfg))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { canvas, sets })
    }

    pub fn orientations(&self) -> Vec<&[f64]> {
        self.sets.iter().map(|s| s.orientations.as_slice()).collect()
    }

    pub fn lengths(&self) -> Vec<&[f64]> {
        self.sets.iter().map(|s| s.lengths.as_slice()).collect()
    }

    pub fn centers(&self) -> Vec<&[Point2]> {
        self.sets.iter().map(|s| s.centers.as_slice()).collect()
    }

    pub fn endpoints(&self) -> Vec<&[(Point2, Point2)]> {
        self.sets.iter().map(|s| s.endpoints.as_slice()).collect()
    }

    pub fn spacings(&self) -> Vec<f64> {
        self.sets.iter().map(|s| s.spacing).collect()
    }

    /// All segments of all sets, set by set.
    pub fn segments(&self) -> Vec<Segment> {
        self.sets.iter().flat_map(|s| s.segments()).collect()
    }

    pub fn fracture_count(&self) -> usize {
        self.sets.iter().map(FractureSet::len).sum()
    }
}
