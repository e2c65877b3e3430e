//! Per-fracture table export (CSV or Parquet, chosen by file extension).

use anyhow::{bail, Context, Result};
use fracnet::FractureMap;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// One row per fracture: set, index, center, orientation, length, endpoints.
pub fn fracture_frame(map: &FractureMap) -> PolarsResult<DataFrame> {
    let n = map.fracture_count();
    let mut set = Vec::with_capacity(n);
    let mut idx = Vec::with_capacity(n);
    let (mut x, mut y, mut theta, mut length) = (
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    );
    let (mut x1, mut y1, mut x2, mut y2) = (
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    );
    for s in &map.sets {
        for i in 0..s.len() {
            set.push(s.name.clone());
            idx.push(i as u32);
            x.push(s.centers[i].x);
            y.push(s.centers[i].y);
            theta.push(s.orientations[i]);
            length.push(s.lengths[i]);
            let (p, q) = s.endpoints[i];
            x1.push(p.x);
            y1.push(p.y);
            x2.push(q.x);
            y2.push(q.y);
        }
    }
    df!(
        "set" => set,
        "index" => idx,
        "x" => x,
        "y" => y,
        "theta" => theta,
        "length" => length,
        "x1" => x1,
        "y1" => y1,
        "x2" => x2,
        "y2" => y2
    )
}

pub fn write_table(map: &FractureMap, path: &Path) -> Result<()> {
    let mut df = fracture_frame(map)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating table dir {}", parent.display()))?;
        }
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        Some("parquet") => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
        _ => bail!("unsupported table extension: {}", path.display()),
    }
    tracing::info!(rows = df.height(), path = %path.display(), "table written");
    Ok(())
}
