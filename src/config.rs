use std::env;
use std::path::PathBuf;

use crate::percentiles::PercentileMethod;

pub const CSV_PATH_ENV: &str = "PLAYER_MASTER_CSV_PATH";
pub const PCT_METHOD_ENV: &str = "PLAYER_MASTER_PCT_METHOD";
pub const DEFAULT_CSV_PATH: &str = "assets/player_master.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub csv_path: PathBuf,
    pub method: PercentileMethod,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            method: PercentileMethod::Rank,
        }
    }
}

impl SourceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(path) = non_blank(lookup(CSV_PATH_ENV)) {
            cfg.csv_path = PathBuf::from(path);
        }
        if let Some(raw) = non_blank(lookup(PCT_METHOD_ENV)) {
            match PercentileMethod::parse(&raw) {
                Some(method) => cfg.method = method,
                None => tracing::warn!(value = %raw, "unknown {}, using rank", PCT_METHOD_ENV),
            }
        }
        cfg
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = SourceConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, SourceConfig::default());
        assert_eq!(cfg.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
    }

    #[test]
    fn reads_overrides() {
        let cfg = SourceConfig::from_lookup(lookup(&[
            (CSV_PATH_ENV, " data/master.csv "),
            (PCT_METHOD_ENV, "ecdf"),
        ]));
        assert_eq!(cfg.csv_path, PathBuf::from("data/master.csv"));
        assert_eq!(cfg.method, PercentileMethod::Ecdf);
    }

    #[test]
    fn blank_and_unknown_values_fall_back() {
        let cfg = SourceConfig::from_lookup(lookup(&[
            (CSV_PATH_ENV, "   "),
            (PCT_METHOD_ENV, "median"),
        ]));
        assert_eq!(cfg, SourceConfig::default());
    }
}
