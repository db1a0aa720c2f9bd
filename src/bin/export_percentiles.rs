use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use prospect_stats::bundle::BundleCache;
use prospect_stats::config::SourceConfig;
use prospect_stats::export;
use prospect_stats::logging::init_logging;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging("info");

    let out = parse_path_arg("--out").ok_or_else(|| anyhow!("missing --out PATH"))?;
    let mut config = SourceConfig::from_env();
    if let Some(csv) = parse_path_arg("--csv") {
        config = config.with_csv_path(csv);
    }

    let cache = BundleCache::from_config(&config);
    let bundle = cache
        .get()
        .with_context(|| format!("load player master from {}", config.csv_path.display()))?;

    let is_json = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let report = if is_json {
        export::export_json(bundle, &config.csv_path.display().to_string(), &out)?
    } else {
        export::export_workbook(bundle, &out)?
    };

    println!("Percentile export complete");
    println!("Output: {}", out.display());
    println!("Players: {}", report.players);
    println!("Raw cells: {}", report.raw_cells);
    println!("Percentile cells: {}", report.pct_cells);
    Ok(())
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
