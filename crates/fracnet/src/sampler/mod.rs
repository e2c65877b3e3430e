//! Named distributions for orientation, length, and spacing samples.
//!
//! Purpose
//! - Turn a distribution name plus `(location, dispersion, count)` into a
//!   finite sample vector, drawing from a caller-supplied RNG.
//! - Unknown names fail with `FractureError::InvalidDistribution`; there is no
//!   silent fallback.
//!
//! Conventions
//! - `Uniform` for orientation and length is degenerate: the location is
//!   repeated `count` times.
//! - `Uniform` spacing draws from `[0.9·mean, 1.1·mean]`.
//! - Length samples pass through `apply_length_floor` before any geometry.

mod von_mises;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma, LogNormal, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, Result};
use von_mises::VonMises;

/// Replacement value for non-positive length samples.
pub const LENGTH_FLOOR: f64 = 0.1;

/// Relative half-width of the uniform spacing band around the mean.
const SPACING_BAND: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OrientationDist {
    /// 2D von Mises–Fisher; dispersion is the concentration κ.
    Fisher,
    Normal,
    Uniform,
    Lognormal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LengthDist {
    /// Mean = location; dispersion unused.
    Exponential,
    /// Shape = location/dispersion, scale = dispersion.
    Gamma,
    Normal,
    Uniform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SpacingDist {
    Uniform,
    Normal,
}

impl FromStr for OrientationDist {
    type Err = FractureError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Fisher" => Ok(Self::Fisher),
            "Normal" => Ok(Self::Normal),
            "Uniform" => Ok(Self::Uniform),
            "Lognormal" => Ok(Self::Lognormal),
            other => Err(invalid_name("orientation", other)),
        }
    }
}

impl FromStr for LengthDist {
    type Err = FractureError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Exponential" => Ok(Self::Exponential),
            "Gamma" => Ok(Self::Gamma),
            "Normal" => Ok(Self::Normal),
            "Uniform" => Ok(Self::Uniform),
            other => Err(invalid_name("length", other)),
        }
    }
}

impl FromStr for SpacingDist {
    type Err = FractureError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Uniform" => Ok(Self::Uniform),
            "Normal" => Ok(Self::Normal),
            other => Err(invalid_name("spacing", other)),
        }
    }
}

impl fmt::Display for OrientationDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for LengthDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for SpacingDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// Config files reach the enums through serde; keep the name lookup in one place.
impl TryFrom<String> for OrientationDist {
    type Error = FractureError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for LengthDist {
    type Error = FractureError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for SpacingDist {
    type Error = FractureError;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

fn invalid_name(family: &'static str, name: &str) -> FractureError {
    FractureError::InvalidDistribution {
        family,
        name: name.to_string(),
    }
}

impl OrientationDist {
    /// Draw `count` angles (radians) around `mu`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mu: f64,
        dispersion: f64,
        count: usize,
    ) -> Result<Vec<f64>> {
        check_finite("orientation", mu, dispersion)?;
        match self {
            Self::Fisher => {
                if dispersion < 0.0 {
                    return Err(FractureError::invalid(
                        "Fisher concentration must be non-negative",
                    ));
                }
                let vm = VonMises::new(mu, dispersion);
                Ok((0..count).map(|_| vm.sample(rng)).collect())
            }
            Self::Normal => draw(rng, normal(mu, dispersion)?, count),
            Self::Uniform => Ok(vec![mu; count]),
            Self::Lognormal => {
                let d = LogNormal::new(mu, dispersion)
                    .map_err(|e| FractureError::invalid(format!("lognormal: {e}")))?;
                draw(rng, d, count)
            }
        }
    }
}

impl LengthDist {
    /// Draw `count` raw length samples. The result is not floored.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mu: f64,
        dispersion: f64,
        count: usize,
    ) -> Result<Vec<f64>> {
        check_finite("length", mu, dispersion)?;
        match self {
            Self::Exponential => {
                if mu <= 0.0 {
                    return Err(FractureError::invalid("exponential mean must be > 0"));
                }
                let d = Exp::new(1.0 / mu)
                    .map_err(|e| FractureError::invalid(format!("exponential: {e}")))?;
                draw(rng, d, count)
            }
            Self::Gamma => {
                if dispersion <= 0.0 {
                    return Err(FractureError::invalid("gamma dispersion must be > 0"));
                }
                let d = Gamma::new(mu / dispersion, dispersion)
                    .map_err(|e| FractureError::invalid(format!("gamma: {e}")))?;
                draw(rng, d, count)
            }
            Self::Normal => draw(rng, normal(mu, dispersion)?, count),
            Self::Uniform => Ok(vec![mu; count]),
        }
    }
}

impl SpacingDist {
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mean: f64,
        dispersion: f64,
        count: usize,
    ) -> Result<Vec<f64>> {
        check_finite("spacing", mean, dispersion)?;
        match self {
            Self::Uniform => {
                if mean <= 0.0 {
                    return Err(FractureError::invalid("uniform spacing mean must be > 0"));
                }
                let lo = (1.0 - SPACING_BAND) * mean;
                let hi = (1.0 + SPACING_BAND) * mean;
                Ok((0..count).map(|_| rng.gen_range(lo..=hi)).collect())
            }
            Self::Normal => draw(rng, normal(mean, dispersion)?, count),
        }
    }
}

/// Orientation samples by distribution name.
pub fn sample_orientation<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    mu: f64,
    dispersion: f64,
    count: usize,
) -> Result<Vec<f64>> {
    name.parse::<OrientationDist>()?.sample(rng, mu, dispersion, count)
}

/// Length samples by distribution name, with the length floor applied.
pub fn sample_length<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    mu: f64,
    dispersion: f64,
    count: usize,
) -> Result<Vec<f64>> {
    let mut out = name.parse::<LengthDist>()?.sample(rng, mu, dispersion, count)?;
    apply_length_floor(&mut out, LENGTH_FLOOR);
    Ok(out)
}

/// Uniform spacing samples in `[0.9·mean, 1.1·mean]`.
pub fn sample_spacing<R: Rng + ?Sized>(rng: &mut R, mean: f64, count: usize) -> Result<Vec<f64>> {
    SpacingDist::Uniform.sample(rng, mean, 0.0, count)
}

/// Replace every non-positive sample with `floor`; returns how many changed.
pub fn apply_length_floor(samples: &mut [f64], floor: f64) -> usize {
    let mut corrected = 0;
    for s in samples.iter_mut() {
        if *s <= 0.0 {
            *s = floor;
            corrected += 1;
        }
    }
    if corrected > 0 {
        tracing::debug!(corrected, floor, "length floor applied");
    }
    corrected
}

fn normal(mu: f64, sigma: f64) -> Result<Normal<f64>> {
    Normal::new(mu, sigma).map_err(|e| FractureError::invalid(format!("normal: {e}")))
}

fn draw<R: Rng + ?Sized, D: Distribution<f64>>(
    rng: &mut R,
    d: D,
    count: usize,
) -> Result<Vec<f64>> {
    Ok((0..count).map(|_| d.sample(rng)).collect())
}

fn check_finite(family: &str, loc: f64, dispersion: f64) -> Result<()> {
    if loc.is_finite() && dispersion.is_finite() {
        Ok(())
    } else {
        Err(FractureError::invalid(format!(
            "{family} parameters must be finite"
        )))
    }
}
