//! Point queries against a built [`Bundle`], used to render stat panels.

use crate::bundle::Bundle;
use crate::player_master::{RawFormat, StatField};

/// Rendered in place of a missing value.
pub const MISSING_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatMode {
    Raw,
    Pct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Stats,
    Percentiles,
}

/// Raw value, or the percentile as a whole number in `0..=100`.
pub fn get_stat(bundle: &Bundle, key: &str, field: StatField, mode: StatMode) -> Option<f64> {
    match mode {
        StatMode::Raw => bundle.row(key)?.get(field),
        StatMode::Pct => get_stat_pct(bundle, key, field).map(f64::from),
    }
}

pub fn get_stat_pct(bundle: &Bundle, key: &str, field: StatField) -> Option<u8> {
    let p = bundle.percentiles(key)?.get(field)?;
    if !p.is_finite() {
        return None;
    }
    Some((p * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// `"54%"`. `None` when there is no percentile; never falls back to the raw value.
pub fn get_stat_pct_label(bundle: &Bundle, key: &str, field: StatField) -> Option<String> {
    get_stat_pct(bundle, key, field).map(|pct| format!("{pct}%"))
}

pub fn format_raw(value: Option<f64>, format: RawFormat) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return MISSING_PLACEHOLDER.to_string();
    };
    match format {
        RawFormat::OneDecimal => format!("{v:.1}"),
        RawFormat::Whole => format!("{}", v.round()),
        RawFormat::Percent => {
            let scaled = if v > 0.0 && v <= 1.0 { v * 100.0 } else { v };
            format!("{scaled:.1}%")
        }
    }
}

/// Panel text for one field in the given mode.
pub fn display_stat(bundle: &Bundle, key: &str, field: StatField, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Stats => format_raw(
            get_stat(bundle, key, field, StatMode::Raw),
            field.raw_format(),
        ),
        DisplayMode::Percentiles => get_stat_pct_label(bundle, key, field)
            .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::build_bundle;
    use crate::percentiles::PercentileMethod;

    fn bundle() -> Bundle {
        build_bundle(
            "name,ppg,fgPercent,gamesPlayed,topg\n\
             Alpha,20.04,0.512,31.6,3.0\n\
             Beta,10,0.485,30,1.0\n\
             Gamma,15,,29,2\n",
            PercentileMethod::Rank,
        )
    }

    #[test]
    fn raw_mode_returns_stored_value() {
        let b = bundle();
        assert_eq!(get_stat(&b, "alpha", StatField::Ppg, StatMode::Raw), Some(20.04));
        assert_eq!(get_stat(&b, "gamma", StatField::FgPercent, StatMode::Raw), None);
        assert_eq!(get_stat(&b, "nobody", StatField::Ppg, StatMode::Raw), None);
    }

    #[test]
    fn pct_mode_returns_whole_percent() {
        let b = bundle();
        assert_eq!(get_stat(&b, "alpha", StatField::Ppg, StatMode::Pct), Some(100.0));
        assert_eq!(get_stat(&b, "gamma", StatField::Ppg, StatMode::Pct), Some(50.0));
        assert_eq!(get_stat(&b, "beta", StatField::Ppg, StatMode::Pct), Some(0.0));
        assert_eq!(get_stat(&b, "beta", StatField::Topg, StatMode::Pct), Some(100.0));
        assert_eq!(get_stat(&b, "gamma", StatField::FgPercent, StatMode::Pct), None);
    }

    #[test]
    fn pct_label_never_falls_back_to_raw() {
        let b = bundle();
        assert_eq!(
            get_stat_pct_label(&b, "gamma", StatField::Ppg).as_deref(),
            Some("50%")
        );
        assert_eq!(get_stat_pct_label(&b, "gamma", StatField::FgPercent), None);
        assert_eq!(get_stat_pct_label(&b, "nobody", StatField::Ppg), None);
    }

    #[test]
    fn raw_formats() {
        assert_eq!(format_raw(Some(20.04), RawFormat::OneDecimal), "20.0");
        assert_eq!(format_raw(Some(31.6), RawFormat::Whole), "32");
        assert_eq!(format_raw(Some(0.512), RawFormat::Percent), "51.2%");
        assert_eq!(format_raw(Some(48.5), RawFormat::Percent), "48.5%");
        assert_eq!(format_raw(Some(0.0), RawFormat::Percent), "0.0%");
        assert_eq!(format_raw(None, RawFormat::OneDecimal), MISSING_PLACEHOLDER);
    }

    #[test]
    fn display_switches_on_mode() {
        let b = bundle();
        assert_eq!(
            display_stat(&b, "alpha", StatField::FgPercent, DisplayMode::Stats),
            "51.2%"
        );
        assert_eq!(
            display_stat(&b, "alpha", StatField::FgPercent, DisplayMode::Percentiles),
            "100%"
        );
        assert_eq!(
            display_stat(&b, "gamma", StatField::FgPercent, DisplayMode::Percentiles),
            MISSING_PLACEHOLDER
        );
    }
}
