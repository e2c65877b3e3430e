use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fracnet::api::{check_parity, compare_maps, map_intersections, MapSummary};
use fracnet::FractureMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod provenance;

use config::RunConfig;

#[derive(Parser)]
#[command(name = "fracnet")]
#[command(about = "Generate 2D fracture networks and count their intersections")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a map and write it as JSON (plus provenance sidecar)
    Generate {
        /// Run config (JSON); the built-in reference map when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the config seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
        /// Optional flat table of fractures (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Count crossings between the sets of a generated map
    Intersect {
        #[arg(long)]
        input: PathBuf,
        /// Write crossing points and per-pair counts as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Summarize two maps and report set-by-set differences
    Compare {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            config,
            seed,
            out,
            table,
        } => generate(config, seed, out, table),
        Action::Intersect { input, out } => intersect(input, out),
        Action::Compare { a, b } => compare(a, b),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn read_map(path: &Path) -> Result<FractureMap> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing map {}", path.display()))
}

fn generate(
    config: Option<PathBuf>,
    seed: Option<u64>,
    out: PathBuf,
    table: Option<PathBuf>,
) -> Result<()> {
    let mut run = match &config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::reference(),
    };
    if let Some(seed) = seed {
        run.seed = seed;
    }
    tracing::info!(
        config = ?config,
        seed = run.seed,
        sets = run.sets.len(),
        out = %out.display(),
        "generate"
    );

    let mut rng = StdRng::seed_from_u64(run.seed);
    let map = FractureMap::generate(&mut rng, run.canvas, &run.sets, &run.sampling)?;
    ensure_parent(&out)?;
    fs::write(&out, serde_json::to_vec_pretty(&map)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let params = json!({
        "config": config.as_ref().map(|p| p.to_string_lossy().into_owned()),
        "run": &run,
        "fractures": map.fracture_count()
    });
    let mut payload = provenance::Payload::new(params)
        .with_seed(run.seed)
        .with_map(&map);
    if let Some(table) = &table {
        ensure_parent(table)?;
        export::write_table(&map, table)?;
        payload = payload.with_output(table);
    }
    let prov = provenance::write_sidecar(&out, payload)?;
    tracing::info!(
        fractures = map.fracture_count(),
        clamped = map.sets.iter().filter(|s| s.was_clamped()).count(),
        provenance = %prov.display(),
        "map written"
    );
    Ok(())
}

fn intersect(input: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let map = read_map(&input)?;
    let report = map_intersections(&map);
    for pair in &report.per_pair {
        tracing::info!(a = %pair.a, b = %pair.b, count = pair.count, "pair");
    }
    tracing::info!(
        input = %input.display(),
        count = report.count(),
        "intersections"
    );
    if let Some(out) = out {
        ensure_parent(&out)?;
        fs::write(&out, serde_json::to_vec_pretty(&report)?)
            .with_context(|| format!("writing {}", out.display()))?;
        provenance::write_sidecar(
            &out,
            provenance::Payload::new(json!({
                "input": input.to_string_lossy(),
                "count": report.count()
            })),
        )?;
    }
    Ok(())
}

fn compare(a: PathBuf, b: PathBuf) -> Result<()> {
    let map_a = read_map(&a)?;
    let map_b = read_map(&b)?;
    if let Err(err) = check_parity(&map_a, &map_b) {
        tracing::warn!(%err, "maps are not comparable set by set");
    }
    let doc = json!({
        "a": MapSummary::of(&map_a),
        "b": MapSummary::of(&map_b),
        "deltas": compare_maps(&map_a, &map_b)
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "fracnet": fracnet::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
