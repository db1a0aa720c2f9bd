use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use once_cell::sync::OnceCell;

use crate::config::SourceConfig;
use crate::error::BundleError;
use crate::percentiles::{PercentileMap, PercentileMethod, compute_percentiles};
use crate::player_master::{Direction, PlayerMasterRow, StatField, normalize_row};
use crate::slug::normalize_name;
use crate::table::parse_table;

/// Where the raw CSV payload comes from.
pub trait StatSource {
    fn read_payload(&self) -> io::Result<String>;

    /// Human-readable origin used in errors and logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatSource for FileSource {
    fn read_payload(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Payload held in memory, e.g. from `include_str!`.
#[derive(Debug, Clone)]
pub struct InlineSource(pub String);

impl StatSource for InlineSource {
    fn read_payload(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline payload".to_string()
    }
}

/// Cohort plus the key -> row and key -> percentile views. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    rows: Vec<PlayerMasterRow>,
    by_key: HashMap<String, usize>,
    pct_by_key: HashMap<String, PercentileMap>,
    method: PercentileMethod,
}

impl Bundle {
    /// Every parsed row, in source order (duplicates included).
    pub fn rows(&self) -> &[PlayerMasterRow] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&PlayerMasterRow> {
        self.by_key.get(key).map(|&idx| &self.rows[idx])
    }

    /// Polarity-adjusted percentiles: higher is always better.
    pub fn percentiles(&self, key: &str) -> Option<&PercentileMap> {
        self.pct_by_key.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn method(&self) -> PercentileMethod {
        self.method
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses `payload` and ranks every declared field across the whole cohort.
pub fn build_bundle(payload: &str, method: PercentileMethod) -> Bundle {
    let table = parse_table(payload);
    if table.is_empty() {
        tracing::warn!("player master table has no header or data rows");
        return Bundle {
            method,
            ..Bundle::default()
        };
    }

    let rows: Vec<PlayerMasterRow> = table
        .rows
        .iter()
        .map(|cells| normalize_row(&table.header, cells))
        .collect();

    let ranked = compute_percentiles(&rows, &StatField::ALL, method);
    let mut by_key = HashMap::with_capacity(rows.len());
    let mut pct_by_key = HashMap::with_capacity(rows.len());
    for (idx, (row, mut pct)) in ranked.into_iter().enumerate() {
        for field in StatField::ALL {
            if field.direction() == Direction::LowerBetter {
                pct.invert(field);
            }
        }
        let key = normalize_name(row.name());
        if by_key.insert(key.clone(), idx).is_some() {
            tracing::warn!(key = %key, name = row.name(), "duplicate lookup key, later row wins");
        }
        pct_by_key.insert(key, pct);
    }

    tracing::info!(
        rows = rows.len(),
        keys = by_key.len(),
        method = method.as_str(),
        "built player master bundle"
    );
    Bundle {
        rows,
        by_key,
        pct_by_key,
        method,
    }
}

/// Build-once, read-many holder for a [`Bundle`].
///
/// The first successful [`BundleCache::get`] reads the source and builds the
/// bundle; concurrent first callers block on that single build. A failed read
/// leaves the cache empty so a later call can try again.
pub struct BundleCache<S> {
    source: S,
    method: PercentileMethod,
    cell: OnceCell<Bundle>,
}

impl<S: StatSource> BundleCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_method(source, PercentileMethod::Rank)
    }

    pub fn with_method(source: S, method: PercentileMethod) -> Self {
        Self {
            source,
            method,
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&Bundle, BundleError> {
        self.cell.get_or_try_init(|| {
            let origin = self.source.describe();
            tracing::debug!(origin = %origin, "reading player master source");
            let payload = self
                .source
                .read_payload()
                .map_err(|source| BundleError::SourceUnavailable { origin, source })?;
            Ok(build_bundle(&payload, self.method))
        })
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl BundleCache<FileSource> {
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::with_method(FileSource::new(&config.csv_path), config.method)
    }
}

/// Process-wide bundle built from [`SourceConfig::from_env`].
pub fn global_bundle() -> Result<&'static Bundle, BundleError> {
    static CACHE: OnceCell<BundleCache<FileSource>> = OnceCell::new();
    CACHE
        .get_or_init(|| BundleCache::from_config(&SourceConfig::from_env()))
        .get()
}
