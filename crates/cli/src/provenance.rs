//! `<stem>.provenance.json` sidecars: how an artifact was produced.
//!
//! A sidecar records the code revision, library version, seed, run params,
//! every file written by the command, and for generated maps the realized
//! count of each set next to what was requested.

use anyhow::{Context, Result};
use fracnet::api::{CapacityShortfall, FractureMap};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Per-set outcome of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetRecord {
    pub name: String,
    pub candidates: usize,
    pub realized: usize,
    pub shortfall: Option<CapacityShortfall>,
}

/// Metadata recorded next to a generated artifact.
#[derive(Debug, Default)]
pub struct Payload {
    pub params: Value,
    pub seed: Option<u64>,
    /// Files written besides the primary artifact.
    pub extra_outputs: Vec<PathBuf>,
    pub sets: Vec<SetRecord>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_outputs.push(path.into());
        self
    }

    /// Record the realized size of every set of `map`.
    pub fn with_map(mut self, map: &FractureMap) -> Self {
        self.sets = map
            .sets
            .iter()
            .map(|s| SetRecord {
                name: s.name.clone(),
                candidates: s.candidates,
                realized: s.len(),
                shortfall: s.shortfall,
            })
            .collect();
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar {
    code_rev: String,
    fracnet: &'static str,
    callsite: Callsite,
    seed: Option<u64>,
    params: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sets: Vec<SetRecord>,
    outputs: Vec<String>,
}

/// Write the sidecar for `artifact` and return its path. The callsite is the
/// caller's location.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let callsite = Location::caller();
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);

    let outputs = std::iter::once(artifact)
        .chain(payload.extra_outputs.iter().map(PathBuf::as_path))
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        fracnet: fracnet::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        seed: payload.seed,
        params: payload.params,
        sets: payload.sets,
        outputs,
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `maps/map1.json` → `maps/map1.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git`;
/// `"unknown"` outside a checkout.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
