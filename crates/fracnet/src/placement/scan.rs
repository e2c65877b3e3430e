//! Per-scan-line geometry: canvas clipping and the first/repeat placement steps.
//!
//! A scan-line is `y = slope·x + b`. Where the line enters the canvas depends
//! on where the intercept `b` sits relative to `[0, H]`, so clipping splits on
//! `Intercept` and each arm uses its own edge formula. The exit is always
//! clamped to the canvas, so a `Run` is the in-canvas x-range of the line.

use rand::Rng;

use crate::geom2::{Canvas, Point2};

/// Longitudinal jitter amplitude as a fraction of the nominal length.
const JITTER_FRAC: f64 = 0.05;
/// Interval factor after the first fracture on a line: `0.5·(lᵢ+lᵢ₊₁)`.
const FIRST_INTERVAL_FRAC: f64 = 0.5;
/// Interval factor for repeat placements: `0.4·(lᵢ+lᵢ₊₁)`.
const REPEAT_INTERVAL_FRAC: f64 = 0.4;

/// Position of a scan-line intercept relative to the canvas height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intercept {
    /// `b < 0`: a rising line enters through the bottom edge.
    Below,
    /// `0 ≤ b ≤ H`: the line enters through the left edge.
    Inside,
    /// `b > H`: a falling line enters through the top edge.
    Above,
}

impl Intercept {
    #[inline]
    pub(crate) fn classify(b: f64, height: f64) -> Self {
        if b < 0.0 {
            Self::Below
        } else if b > height {
            Self::Above
        } else {
            Self::Inside
        }
    }
}

/// In-canvas x-range `[x_min, x_max]` of one scan-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Run {
    pub x_min: f64,
    pub x_max: f64,
}

/// x-window in which the next fracture on the line may start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Window {
    pub lo: f64,
    pub hi: f64,
}

/// Along-line offsets to the next fracture, before projection onto x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Gap {
    pub interval: f64,
    pub distance: f64,
}

impl Gap {
    pub(crate) fn first(len_cur: f64, len_next: f64) -> Self {
        Self {
            interval: FIRST_INTERVAL_FRAC * (len_cur + len_next),
            distance: 0.5 * len_cur + len_next,
        }
    }

    pub(crate) fn repeat(len_cur: f64, len_next: f64) -> Self {
        Self {
            interval: REPEAT_INTERVAL_FRAC * (len_cur + len_next),
            distance: 0.5 * len_cur + len_next,
        }
    }
}

/// Clip `y = slope·x + b` to the canvas. `None` if the line misses it.
pub(crate) fn clip_to_canvas(b: f64, slope: f64, canvas: &Canvas) -> Option<Run> {
    let (w, h) = (canvas.width, canvas.height);
    let (x_min, x_max) = match Intercept::classify(b, h) {
        Intercept::Below => {
            if slope <= 0.0 {
                return None;
            }
            (-b / slope, ((h - b) / slope).min(w))
        }
        Intercept::Inside => {
            if slope > 0.0 {
                (0.0, ((h - b) / slope).min(w))
            } else if slope < 0.0 {
                (0.0, (-b / slope).min(w))
            } else {
                (0.0, w)
            }
        }
        Intercept::Above => {
            if slope >= 0.0 {
                return None;
            }
            ((h - b) / slope, (-b / slope).min(w))
        }
    };
    let x_min = x_min.max(0.0);
    (x_max > x_min).then_some(Run { x_min, x_max })
}

/// One scan-line with the per-set constants needed to place on it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScanLine {
    pub b: f64,
    pub slope: f64,
    /// `|cos θ|`, projects along-line distances onto x.
    pub cos_abs: f64,
    /// Nominal set length (drives the first-placement range and the jitter).
    pub length: f64,
}

impl ScanLine {
    /// First fracture on the line. If the run is longer than one fracture,
    /// place near the low end and return the window for the next one;
    /// otherwise place anywhere on the run and close the line.
    pub(crate) fn place_first<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        run: Run,
        gap: Gap,
    ) -> (Point2, Option<Window>) {
        let run_length = (run.x_max - run.x_min) / self.cos_abs;
        if run_length > self.length {
            let x = uniform(rng, run.x_min, run.x_min + self.length * self.cos_abs);
            (self.point_at(rng, x), Some(self.window_after(x, gap)))
        } else {
            let x = uniform(rng, run.x_min, run.x_max);
            (self.point_at(rng, x), None)
        }
    }

    /// Next fracture inside `window`; the line stays open while the next
    /// window still starts before `x_max`.
    pub(crate) fn place_next<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        window: Window,
        x_max: f64,
        gap: Gap,
    ) -> (Point2, Option<Window>) {
        let x = uniform(rng, window.lo, window.hi);
        let next = self.window_after(x, gap);
        (self.point_at(rng, x), (x_max > next.lo).then_some(next))
    }

    fn window_after(&self, x: f64, gap: Gap) -> Window {
        Window {
            lo: x + gap.interval * self.cos_abs,
            hi: x + gap.distance * self.cos_abs,
        }
    }

    fn point_at<R: Rng + ?Sized>(&self, rng: &mut R, x: f64) -> Point2 {
        let j = JITTER_FRAC * self.length;
        let y = self.slope * x + self.b + rng.gen_range(-j..=j);
        Point2::new(x, y)
    }
}

/// Uniform on `[lo, hi)`; collapses to `lo` for an empty range.
#[inline]
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
