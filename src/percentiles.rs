use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::player_master::{PlayerMasterRow, StatField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentileMethod {
    /// `(# <= x - 1) / (n - 1)`: lowest value maps to 0, highest to 1.
    #[default]
    Rank,
    /// `(# <= x) / n`, in `(0, 1]`.
    Ecdf,
}

impl PercentileMethod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rank" => Some(Self::Rank),
            "ecdf" => Some(Self::Ecdf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Ecdf => "ecdf",
        }
    }
}

/// Per-player percentiles in `[0, 1]`. A field with no value for the player has
/// no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentileMap {
    values: BTreeMap<StatField, f64>,
}

impl PercentileMap {
    pub fn get(&self, field: StatField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn insert(&mut self, field: StatField, pct: f64) {
        self.values.insert(field, pct);
    }

    /// Replaces `p` with `1 - p` for `field`, if present.
    pub fn invert(&mut self, field: StatField) {
        if let Some(p) = self.values.get_mut(&field) {
            *p = 1.0 - *p;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        self.values.iter().map(|(f, p)| (*f, *p))
    }
}

impl Serialize for PercentileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, pct) in &self.values {
            map.serialize_entry(field.header(), pct)?;
        }
        map.end()
    }
}

/// Percentile of `x` within `sorted` (ascending, finite). `None` when `sorted`
/// is empty.
pub fn percentile_of(sorted: &[f64], x: f64, method: PercentileMethod) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let leq = sorted.partition_point(|v| *v <= x);
    let n = sorted.len();
    match method {
        PercentileMethod::Ecdf => Some(leq as f64 / n as f64),
        PercentileMethod::Rank => {
            if n == 1 {
                return Some(1.0);
            }
            let rank = leq.saturating_sub(1);
            Some(rank as f64 / (n - 1) as f64)
        }
    }
}

/// Ranks every row against the whole cohort, one field at a time. Absent
/// values neither get an entry nor count toward the population.
pub fn compute_percentiles<'a>(
    rows: &'a [PlayerMasterRow],
    fields: &[StatField],
    method: PercentileMethod,
) -> Vec<(&'a PlayerMasterRow, PercentileMap)> {
    let sorted_by_field: Vec<(StatField, Vec<f64>)> = fields
        .iter()
        .map(|&field| {
            let mut vals: Vec<f64> = rows.iter().filter_map(|r| r.get(field)).collect();
            vals.sort_by(f64::total_cmp);
            (field, vals)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let mut pct = PercentileMap::default();
            for (field, sorted) in &sorted_by_field {
                let Some(v) = row.get(*field) else { continue };
                if let Some(p) = percentile_of(sorted, v, method) {
                    pct.insert(*field, p);
                }
            }
            (row, pct)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(values: &[Option<f64>]) -> Vec<PlayerMasterRow> {
        values
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let row = PlayerMasterRow::new(format!("P{idx}"));
                match v {
                    Some(v) => row.with_stat(StatField::Ppg, *v),
                    None => row,
                }
            })
            .collect()
    }

    fn ppg_pcts(rows: &[PlayerMasterRow], method: PercentileMethod) -> Vec<Option<f64>> {
        compute_percentiles(rows, &[StatField::Ppg], method)
            .into_iter()
            .map(|(_, m)| m.get(StatField::Ppg))
            .collect()
    }

    #[test]
    fn rank_spans_zero_to_one() {
        let rows = cohort(&[Some(10.0), Some(30.0), Some(20.0)]);
        assert_eq!(
            ppg_pcts(&rows, PercentileMethod::Rank),
            vec![Some(0.0), Some(1.0), Some(0.5)]
        );
    }

    #[test]
    fn ecdf_never_reaches_zero() {
        let rows = cohort(&[Some(10.0), Some(30.0), Some(20.0), Some(40.0)]);
        assert_eq!(
            ppg_pcts(&rows, PercentileMethod::Ecdf),
            vec![Some(0.25), Some(0.75), Some(0.5), Some(1.0)]
        );
    }

    #[test]
    fn ties_take_the_upper_position() {
        let rows = cohort(&[Some(5.0), Some(5.0), Some(1.0), Some(9.0), Some(9.0)]);
        assert_eq!(
            ppg_pcts(&rows, PercentileMethod::Rank),
            vec![Some(0.5), Some(0.5), Some(0.0), Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn single_value_is_top() {
        let rows = cohort(&[None, Some(3.0), None]);
        assert_eq!(
            ppg_pcts(&rows, PercentileMethod::Rank),
            vec![None, Some(1.0), None]
        );
    }

    #[test]
    fn all_equal_values_share_one() {
        let rows = cohort(&[Some(2.0), Some(2.0), Some(2.0)]);
        assert_eq!(
            ppg_pcts(&rows, PercentileMethod::Rank),
            vec![Some(1.0), Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn absent_values_do_not_shift_others() {
        let with_gaps = cohort(&[Some(1.0), None, Some(2.0), None, Some(3.0)]);
        let dense = cohort(&[Some(1.0), Some(2.0), Some(3.0)]);
        let gaps: Vec<f64> = ppg_pcts(&with_gaps, PercentileMethod::Rank)
            .into_iter()
            .flatten()
            .collect();
        let full: Vec<f64> = ppg_pcts(&dense, PercentileMethod::Rank)
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(gaps, full);
    }

    #[test]
    fn empty_population_has_no_percentile() {
        assert_eq!(percentile_of(&[], 1.0, PercentileMethod::Rank), None);
        assert_eq!(percentile_of(&[], 1.0, PercentileMethod::Ecdf), None);
    }

    #[test]
    fn invert_only_touches_present_entries() {
        let mut map = PercentileMap::default();
        map.insert(StatField::Topg, 0.25);
        map.invert(StatField::Topg);
        map.invert(StatField::Tovrate);
        assert_eq!(map.get(StatField::Topg), Some(0.75));
        assert_eq!(map.get(StatField::Tovrate), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn method_parse() {
        assert_eq!(PercentileMethod::parse(" ECDF "), Some(PercentileMethod::Ecdf));
        assert_eq!(PercentileMethod::parse("rank"), Some(PercentileMethod::Rank));
        assert_eq!(PercentileMethod::parse("zscore"), None);
    }
}
