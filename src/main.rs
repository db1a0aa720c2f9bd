use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use prospect_stats::bundle::BundleCache;
use prospect_stats::config::SourceConfig;
use prospect_stats::logging::init_logging;
use prospect_stats::player_master::StatGroup;
use prospect_stats::slug::normalize_name;
use prospect_stats::stat_access::{DisplayMode, display_stat};

struct Args {
    name: String,
    mode: DisplayMode,
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging("warn");

    let args = parse_args(std::env::args().skip(1).collect())?;
    let mut config = SourceConfig::from_env();
    if let Some(path) = args.csv {
        config = config.with_csv_path(path);
    }

    let cache = BundleCache::from_config(&config);
    let bundle = cache
        .get()
        .with_context(|| format!("load player master from {}", config.csv_path.display()))?;

    let key = normalize_name(&args.name);
    let Some(row) = bundle.row(&key) else {
        println!("No stats for \"{}\" (key: {key})", args.name);
        return Ok(());
    };

    println!("{}", panel_heading(row.name(), args.mode));
    for group in StatGroup::ALL {
        println!();
        println!("{}", group.title());
        for field in group.fields() {
            println!(
                "  {:<6} {:>8}",
                field.label(),
                display_stat(bundle, &key, field, args.mode)
            );
        }
    }
    Ok(())
}

fn panel_heading(name: &str, mode: DisplayMode) -> String {
    let heading = match mode {
        DisplayMode::Stats => "Season stats",
        DisplayMode::Percentiles => "Percentiles",
    };
    format!("{name}: {heading}")
}

fn parse_args(args: Vec<String>) -> Result<Args> {
    let mut name_parts = Vec::new();
    let mut mode = DisplayMode::Stats;
    let mut csv = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--pct" {
            mode = DisplayMode::Percentiles;
        } else if let Some(path) = arg.strip_prefix("--csv=") {
            csv = Some(PathBuf::from(path.trim()));
        } else if arg == "--csv" {
            let Some(next) = iter.next() else {
                bail!("--csv needs a path");
            };
            csv = Some(PathBuf::from(next.trim()));
        } else {
            name_parts.push(arg);
        }
    }
    if name_parts.is_empty() {
        bail!("usage: prospect_stats <player name> [--pct] [--csv PATH]");
    }
    Ok(Args {
        name: name_parts.join(" "),
        mode,
        csv,
    })
}
