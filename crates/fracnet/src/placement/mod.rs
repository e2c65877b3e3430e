//! Placement engine: candidate fracture centers along parallel scan-lines.
//!
//! Purpose
//! - Sweep the canvas with lines parallel to the set orientation, spaced by
//!   the sampled spacings, and pack as many fractures per line as the line's
//!   in-canvas run allows.
//!
//! Model
//! - θ is standardized into `[0, π)` and mapped once onto a `Regime`:
//!   rising lines (`θ < π/2`), falling lines (`θ > π/2`), or vertical lines.
//! - Rising and falling regimes generate intercepts and share the per-line
//!   first/repeat placement loop in `scan`. The vertical regime places one
//!   center per line at a uniform height and skips the loop.
//! - Work is bounded by `PlacementLimits`; when a ceiling trips the pool is
//!   truncated, never an error.

mod scan;

use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, Result};
use crate::geom2::{standardize_theta, Canvas, Point2};
use scan::{clip_to_canvas, Gap, ScanLine};

/// Tolerance for treating a standardized angle as exactly vertical.
const VERTICAL_EPS: f64 = 1e-12;

/// Hard iteration ceilings for the scan-line sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementLimits {
    /// No new scan-line is started once this many fractures were placed.
    pub max_placement_index: usize,
    /// Repeat placement on a line stops once the placement index reaches
    /// `length_samples.len() - 1 - sample_tail_margin`.
    pub sample_tail_margin: usize,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            max_placement_index: 500,
            sample_tail_margin: 2,
        }
    }
}

/// Orientation regime, selected once per set from the standardized angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Rising,
    Falling,
    Vertical,
}

impl Regime {
    /// Regime of a standardized angle in `[0, π)`.
    pub fn of(theta: f64) -> Self {
        if (theta - FRAC_PI_2).abs() <= VERTICAL_EPS {
            Self::Vertical
        } else if theta < FRAC_PI_2 {
            Self::Rising
        } else {
            Self::Falling
        }
    }

    /// Number of scan-lines needed to sweep the canvas at nominal spacing.
    pub fn scan_line_count(self, theta: f64, spacing: f64, canvas: &Canvas) -> usize {
        let (w, h) = (canvas.width, canvas.height);
        let n = match self {
            Self::Rising => (h + w * theta.tan()) / (spacing / theta.cos()),
            Self::Falling => (h - w * theta.tan()) / (-spacing / theta.cos()),
            Self::Vertical => w / spacing,
        };
        if n.is_finite() {
            n.floor().max(0.0) as usize
        } else {
            0
        }
    }

    /// Intercepts `b_i` for the non-vertical regimes (empty for `Vertical`).
    fn intercepts(self, theta: f64, spacing_samples: &[f64], canvas: &Canvas) -> Vec<f64> {
        let cos = theta.cos();
        match self {
            Self::Rising => {
                let b0 = -canvas.width * theta.tan();
                spacing_samples
                    .iter()
                    .enumerate()
                    .map(|(i, s)| b0 + i as f64 * (s / cos))
                    .collect()
            }
            Self::Falling => spacing_samples
                .iter()
                .enumerate()
                .map(|(i, s)| (i + 1) as f64 * (-s / cos))
                .collect(),
            Self::Vertical => Vec::new(),
        }
    }
}

/// Inputs for one set's placement pass.
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest<'a> {
    /// Target orientation in radians (any range; standardized internally).
    pub theta: f64,
    /// Nominal spacing; fixes the scan-line count.
    pub spacing: f64,
    /// Per-line spacing samples.
    pub spacing_samples: &'a [f64],
    /// Nominal length; fixes the first-placement range and the jitter.
    pub length: f64,
    /// Floored length samples, consumed one per placed fracture.
    pub length_samples: &'a [f64],
}

impl PlacementRequest<'_> {
    fn validate(&self) -> Result<()> {
        if !self.theta.is_finite() {
            return Err(FractureError::invalid("theta must be finite"));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(FractureError::invalid("spacing must be finite and > 0"));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(FractureError::invalid("length must be finite and > 0"));
        }
        Ok(())
    }
}

/// Candidate centers as parallel coordinate lists, pooled over all lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidatePool {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl CandidatePool {
    fn with_capacity(n: usize) -> Self {
        Self {
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, p: Point2) {
        self.xs.push(p.x);
        self.ys.push(p.y);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<Point2> {
        Some(Point2::new(*self.xs.get(i)?, *self.ys.get(i)?))
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Point2::new(x, y))
    }
}

/// Generate candidate centers for one set.
pub fn generate_centers<R: Rng + ?Sized>(
    rng: &mut R,
    req: &PlacementRequest<'_>,
    canvas: &Canvas,
    limits: &PlacementLimits,
) -> Result<CandidatePool> {
    req.validate()?;
    canvas.validate()?;
    let theta = standardize_theta(req.theta);
    let regime = Regime::of(theta);
    let wanted = regime.scan_line_count(theta, req.spacing, canvas);
    let n = wanted.min(req.spacing_samples.len());
    if n < wanted {
        tracing::debug!(wanted, n, "scan-line count truncated to spacing samples");
    }
    let spacing_samples = &req.spacing_samples[..n];

    let pool = match regime {
        Regime::Vertical => place_vertical(rng, spacing_samples, canvas),
        Regime::Rising | Regime::Falling => {
            let intercepts = regime.intercepts(theta, spacing_samples, canvas);
            place_on_lines(rng, theta, req, &intercepts, canvas, limits)
        }
    };
    tracing::debug!(
        ?regime,
        scan_lines = n,
        candidates = pool.len(),
        "placement done"
    );
    Ok(pool)
}

fn place_vertical<R: Rng + ?Sized>(
    rng: &mut R,
    spacing_samples: &[f64],
    canvas: &Canvas,
) -> CandidatePool {
    let mut pool = CandidatePool::with_capacity(spacing_samples.len());
    for (i, s) in spacing_samples.iter().enumerate() {
        let x = (i + 1) as f64 * s;
        let y = rng.gen_range(0.0..canvas.height);
        pool.push(Point2::new(x, y));
    }
    pool
}

fn place_on_lines<R: Rng + ?Sized>(
    rng: &mut R,
    theta: f64,
    req: &PlacementRequest<'_>,
    intercepts: &[f64],
    canvas: &Canvas,
    limits: &PlacementLimits,
) -> CandidatePool {
    let lengths = req.length_samples;
    let index_max = lengths.len().saturating_sub(1);
    let slope = theta.tan();
    let cos_abs = theta.cos().abs();
    let mut pool = CandidatePool::with_capacity(limits.max_placement_index);
    let mut index = 0usize;

    for &b in intercepts {
        if index >= limits.max_placement_index {
            tracing::debug!(index, "placement ceiling reached; truncating sweep");
            break;
        }
        if index + 1 >= lengths.len() {
            tracing::debug!(index, "length samples exhausted; truncating sweep");
            break;
        }
        let Some(run) = clip_to_canvas(b, slope, canvas) else {
            continue;
        };
        let line = ScanLine {
            b,
            slope,
            cos_abs,
            length: req.length,
        };
        let gap = Gap::first(lengths[index], lengths[index + 1]);
        let (p, mut window) = line.place_first(rng, run, gap);
        pool.push(p);
        index += 1;

        while let Some(w) = window {
            if index.saturating_add(limits.sample_tail_margin) >= index_max || w.hi >= run.x_max {
                break;
            }
            let gap = Gap::repeat(lengths[index], lengths[index + 1]);
            let (p, next) = line.place_next(rng, w, run.x_max, gap);
            pool.push(p);
            index += 1;
            window = next;
        }
    }
    pool
}
