use anyhow::{Context, Result};
use glob::glob;
use sageflat::{clean, decode, write, FlattenConfig};
use std::env;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) read invocation ──────────────────────────────────────────
    let mut args = env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| "exports/*.csv".to_string());
    let cfg = match args.next() {
        Some(path) => FlattenConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config {}", path))?,
        None => FlattenConfig::default(),
    };
    info!(pattern = %pattern, levels = ?cfg.levels, "flattening exports");

    // ─── 3) flatten each matching export ─────────────────────────────
    let mut matched = 0usize;
    let mut failed = 0usize;
    for entry in glob(&pattern).context("invalid input glob")? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                error!("unreadable glob entry: {}", e);
                failed += 1;
                continue;
            }
        };
        matched += 1;
        if let Err(e) = flatten_file(&path, &cfg) {
            error!("{} failed: {:#}", path.display(), e);
            failed += 1;
        }
    }

    if matched == 0 {
        info!("no files matched; exit");
        return Ok(());
    }
    info!(matched, failed, "all done");
    Ok(())
}

/// Clean, decode and write one export; the output lands beside the input.
fn flatten_file(path: &Path, cfg: &FlattenConfig) -> Result<()> {
    let raw = clean::load_csv(path).with_context(|| format!("loading {}", path.display()))?;
    let cleaned = clean::prepare(raw, cfg).context("cleaning export")?;
    let flat = decode::flatten(&cleaned, cfg).context("decoding hierarchy")?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    let out_path = path.with_file_name(format!("{stem}_flat.csv"));
    write::write_csv(&flat, &out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;

    info!(rows = flat.rows.len(), out = %out_path.display(), "flattened");
    Ok(())
}
