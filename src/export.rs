use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use crate::bundle::Bundle;
use crate::percentiles::PercentileMap;
use crate::player_master::{NAME_COLUMN, PlayerMasterRow, StatField};
use crate::slug::normalize_name;

const ARTIFACT_VERSION: u32 = 1;

pub struct ExportReport {
    pub players: usize,
    pub raw_cells: usize,
    pub pct_cells: usize,
}

#[derive(Debug, Serialize)]
pub struct BundleArtifact<'a> {
    pub version: u32,
    pub generated_at: String,
    pub source: String,
    pub method: &'static str,
    pub players: Vec<PlayerArtifact<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PlayerArtifact<'a> {
    pub key: String,
    pub stats: &'a PlayerMasterRow,
    pub percentiles: Option<&'a PercentileMap>,
}

/// One entry per lookup key, in source order of the row that owns the key.
pub fn bundle_artifact<'a>(bundle: &'a Bundle, source: &str) -> BundleArtifact<'a> {
    let players = keyed_rows(bundle)
        .map(|(key, row)| PlayerArtifact {
            percentiles: bundle.percentiles(&key),
            key,
            stats: row,
        })
        .collect();
    BundleArtifact {
        version: ARTIFACT_VERSION,
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.to_string(),
        method: bundle.method().as_str(),
        players,
    }
}

pub fn export_json(bundle: &Bundle, source: &str, path: &Path) -> Result<ExportReport> {
    let artifact = bundle_artifact(bundle, source);
    let json = serde_json::to_string_pretty(&artifact).context("serialize bundle artifact")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(report(bundle))
}

/// Writes `Raw` and `Percentiles` sheets; percentile cells are whole percents.
pub fn export_workbook(bundle: &Bundle, path: &Path) -> Result<ExportReport> {
    let mut header = vec!["Key".to_string(), NAME_COLUMN.to_string()];
    header.extend(StatField::ALL.iter().map(|f| f.header().to_string()));

    let mut raw_rows = vec![header.clone()];
    let mut pct_rows = vec![header];
    for (key, row) in keyed_rows(bundle) {
        let pct = bundle.percentiles(&key);
        let mut raw_line = vec![key.clone(), row.name().to_string()];
        let mut pct_line = vec![key, row.name().to_string()];
        for field in StatField::ALL {
            raw_line.push(opt_to_string(row.get(field)));
            pct_line.push(opt_to_string(
                pct.and_then(|m| m.get(field))
                    .map(|p| (p * 100.0).round().clamp(0.0, 100.0) as u8),
            ));
        }
        raw_rows.push(raw_line);
        pct_rows.push(pct_line);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Raw")?;
        write_rows(sheet, &raw_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Percentiles")?;
        write_rows(sheet, &pct_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(report(bundle))
}

fn keyed_rows(bundle: &Bundle) -> impl Iterator<Item = (String, &PlayerMasterRow)> {
    bundle.rows().iter().filter_map(|row| {
        let key = normalize_name(row.name());
        let owner = bundle.row(&key)?;
        std::ptr::eq(owner, row).then_some((key, row))
    })
}

fn report(bundle: &Bundle) -> ExportReport {
    let mut report = ExportReport {
        players: 0,
        raw_cells: 0,
        pct_cells: 0,
    };
    for (key, row) in keyed_rows(bundle) {
        report.players += 1;
        report.raw_cells += row.stats().count();
        report.pct_cells += bundle.percentiles(&key).map_or(0, PercentileMap::len);
    }
    report
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
