//! von Mises ("Fisher" in 2D) angular sampler.
//!
//! Best & Fisher (1979) wrapped-Cauchy envelope rejection. Samples are
//! returned wrapped into `[-π, π)` after adding the location.

use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Below this concentration the density is numerically uniform.
const KAPPA_UNIFORM: f64 = 1e-8;

#[derive(Clone, Copy, Debug)]
pub(crate) struct VonMises {
    mu: f64,
    kappa: f64,
    r: f64,
}

impl VonMises {
    /// `kappa` must be finite and non-negative (checked by the caller).
    pub(crate) fn new(mu: f64, kappa: f64) -> Self {
        let tau = 1.0 + (1.0 + 4.0 * kappa * kappa).sqrt();
        let rho = (tau - (2.0 * tau).sqrt()) / (2.0 * kappa);
        let r = (1.0 + rho * rho) / (2.0 * rho);
        Self { mu, kappa, r }
    }

    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.kappa < KAPPA_UNIFORM {
            return wrap_pi(self.mu + PI * (2.0 * rng.gen::<f64>() - 1.0));
        }
        let f = loop {
            let z = (PI * rng.gen::<f64>()).cos();
            let f = (1.0 + self.r * z) / (self.r + z);
            let c = self.kappa * (self.r - f);
            let u2: f64 = rng.gen();
            if c * (2.0 - c) - u2 > 0.0 || (c / u2).ln() + 1.0 - c >= 0.0 {
                break f;
            }
        };
        let angle = f.clamp(-1.0, 1.0).acos();
        let signed = if rng.gen::<f64>() > 0.5 { angle } else { -angle };
        wrap_pi(self.mu + signed)
    }
}

#[inline]
fn wrap_pi(theta: f64) -> f64 {
    (theta + PI).rem_euclid(TAU) - PI
}
