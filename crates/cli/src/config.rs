//! Run configuration: canvas, seed, sampling policy, and set list (JSON).

use anyhow::{ensure, Context, Result};
use fracnet::api::{reference_configs, LengthDist, OrientationDist, SpacingDist};
use fracnet::{Canvas, SamplingCfg, SetConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed of the reference runs.
pub const DEFAULT_SEED: u64 = 5;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub sampling: SamplingCfg,
    pub sets: Vec<SetConfig>,
}

/// Distribution names as written in the config file.
#[derive(Default, Deserialize)]
struct SamplingNames {
    orientation: Option<String>,
    length: Option<String>,
    spacing: Option<String>,
}

impl SamplingNames {
    /// Look every name up before the full parse, so an unknown name surfaces
    /// as `FractureError::InvalidDistribution` rather than a serde message.
    fn resolve(&self) -> fracnet::Result<()> {
        if let Some(name) = &self.orientation {
            name.parse::<OrientationDist>()?;
        }
        if let Some(name) = &self.length {
            name.parse::<LengthDist>()?;
        }
        if let Some(name) = &self.spacing {
            name.parse::<SpacingDist>()?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct NamesOnly {
    #[serde(default)]
    sampling: SamplingNames,
}

impl RunConfig {
    /// Built-in reference map (60×60, five sets, seed 5).
    pub fn reference() -> Self {
        let (canvas, sets) = reference_configs();
        Self {
            canvas,
            seed: DEFAULT_SEED,
            sampling: SamplingCfg::default(),
            sets,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        if let Ok(names) = serde_json::from_slice::<NamesOnly>(&raw) {
            names
                .sampling
                .resolve()
                .with_context(|| format!("sampling in {}", path.display()))?;
        }
        let cfg: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing run config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.sets.is_empty(), "run config has no sets");
        self.canvas.validate()?;
        self.sampling.validate()?;
        for set in &self.sets {
            set.validate()?;
        }
        Ok(())
    }
}
