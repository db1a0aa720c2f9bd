use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Header column holding the display name.
pub const NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatField {
    // season averages
    Ppg,
    Astpg,
    Totalrebpg,
    Spg,
    Bpg,
    Topg,
    // efficiency
    FgPercent,
    TwoPercent,
    ThreePercent,
    FtPercent,
    TsPercent,
    EfgPercent,
    // availability
    GamesPlayed,
    Mpg,
    // defense
    Drating,
    Dws,
    Dbpm,
    Stlrate,
    Blkrate,
    // rebounding
    Orebrate,
    Drebrate,
    Totalrebrate,
    // creation
    Astrate,
    Tovrate,
    Usgrate,
    // impact
    Ws,
    Ortg,
    Ows,
    Obpm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGroup {
    SeasonAverages,
    Efficiency,
    Availability,
    Defense,
    Rebounding,
    Creation,
    Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

/// How a raw value is rendered in stats mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    OneDecimal,
    Whole,
    /// Shooting splits and rates; stored either as `0..1` or `0..100`.
    Percent,
}

impl StatField {
    pub const COUNT: usize = 29;

    /// Every metric, in declaration order. This is also the percentile field list.
    pub const ALL: [StatField; Self::COUNT] = [
        StatField::Ppg,
        StatField::Astpg,
        StatField::Totalrebpg,
        StatField::Spg,
        StatField::Bpg,
        StatField::Topg,
        StatField::FgPercent,
        StatField::TwoPercent,
        StatField::ThreePercent,
        StatField::FtPercent,
        StatField::TsPercent,
        StatField::EfgPercent,
        StatField::GamesPlayed,
        StatField::Mpg,
        StatField::Drating,
        StatField::Dws,
        StatField::Dbpm,
        StatField::Stlrate,
        StatField::Blkrate,
        StatField::Orebrate,
        StatField::Drebrate,
        StatField::Totalrebrate,
        StatField::Astrate,
        StatField::Tovrate,
        StatField::Usgrate,
        StatField::Ws,
        StatField::Ortg,
        StatField::Ows,
        StatField::Obpm,
    ];

    /// Exact (case-sensitive) CSV header for this metric.
    pub fn header(self) -> &'static str {
        match self {
            StatField::Ppg => "ppg",
            StatField::Astpg => "astpg",
            StatField::Totalrebpg => "totalrebpg",
            StatField::Spg => "spg",
            StatField::Bpg => "bpg",
            StatField::Topg => "topg",
            StatField::FgPercent => "fgPercent",
            StatField::TwoPercent => "twoPercent",
            StatField::ThreePercent => "threePercent",
            StatField::FtPercent => "ftPercent",
            StatField::TsPercent => "tsPercent",
            StatField::EfgPercent => "efgPercent",
            StatField::GamesPlayed => "gamesPlayed",
            StatField::Mpg => "mpg",
            StatField::Drating => "drating",
            StatField::Dws => "dws",
            StatField::Dbpm => "dbpm",
            StatField::Stlrate => "stlrate",
            StatField::Blkrate => "blkrate",
            StatField::Orebrate => "orebrate",
            StatField::Drebrate => "drebrate",
            StatField::Totalrebrate => "totalrebrate",
            StatField::Astrate => "astrate",
            StatField::Tovrate => "tovrate",
            StatField::Usgrate => "usgrate",
            StatField::Ws => "ws",
            StatField::Ortg => "ortg",
            StatField::Ows => "ows",
            StatField::Obpm => "obpm",
        }
    }

    pub fn from_header(raw: &str) -> Option<StatField> {
        Self::ALL.into_iter().find(|f| f.header() == raw)
    }

    /// Short panel label, e.g. `"FG%"`.
    pub fn label(self) -> &'static str {
        match self {
            StatField::Ppg => "PPG",
            StatField::Astpg => "AST",
            StatField::Totalrebpg => "REB",
            StatField::Spg => "STL",
            StatField::Bpg => "BLK",
            StatField::Topg => "TOV",
            StatField::FgPercent => "FG%",
            StatField::TwoPercent => "2P%",
            StatField::ThreePercent => "3P%",
            StatField::FtPercent => "FT%",
            StatField::TsPercent => "TS%",
            StatField::EfgPercent => "eFG%",
            StatField::GamesPlayed => "GP",
            StatField::Mpg => "MPG",
            StatField::Drating => "DRTG",
            StatField::Dws => "DWS",
            StatField::Dbpm => "DBPM",
            StatField::Stlrate => "STL%",
            StatField::Blkrate => "BLK%",
            StatField::Orebrate => "OREB%",
            StatField::Drebrate => "DREB%",
            StatField::Totalrebrate => "TREB%",
            StatField::Astrate => "AST%",
            StatField::Tovrate => "TOV%",
            StatField::Usgrate => "USG%",
            StatField::Ws => "WS",
            StatField::Ortg => "ORTG",
            StatField::Ows => "OWS",
            StatField::Obpm => "OBPM",
        }
    }

    pub fn group(self) -> StatGroup {
        use StatField as F;
        match self {
            F::Ppg | F::Astpg | F::Totalrebpg | F::Spg | F::Bpg | F::Topg => {
                StatGroup::SeasonAverages
            }
            F::FgPercent
            | F::TwoPercent
            | F::ThreePercent
            | F::FtPercent
            | F::TsPercent
            | F::EfgPercent => StatGroup::Efficiency,
            F::GamesPlayed | F::Mpg => StatGroup::Availability,
            F::Drating | F::Dws | F::Dbpm | F::Stlrate | F::Blkrate => StatGroup::Defense,
            F::Orebrate | F::Drebrate | F::Totalrebrate => StatGroup::Rebounding,
            F::Astrate | F::Tovrate | F::Usgrate => StatGroup::Creation,
            F::Ws | F::Ortg | F::Ows | F::Obpm => StatGroup::Impact,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            StatField::Topg | StatField::Tovrate | StatField::Drating => Direction::LowerBetter,
            _ => Direction::HigherBetter,
        }
    }

    pub fn raw_format(self) -> RawFormat {
        use StatField as F;
        match self {
            F::GamesPlayed => RawFormat::Whole,
            F::FgPercent
            | F::TwoPercent
            | F::ThreePercent
            | F::FtPercent
            | F::TsPercent
            | F::EfgPercent
            | F::Stlrate
            | F::Blkrate
            | F::Orebrate
            | F::Drebrate
            | F::Totalrebrate
            | F::Astrate
            | F::Tovrate
            | F::Usgrate => RawFormat::Percent,
            _ => RawFormat::OneDecimal,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl StatGroup {
    pub const ALL: [StatGroup; 7] = [
        StatGroup::SeasonAverages,
        StatGroup::Efficiency,
        StatGroup::Availability,
        StatGroup::Defense,
        StatGroup::Rebounding,
        StatGroup::Creation,
        StatGroup::Impact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            StatGroup::SeasonAverages => "Season Averages",
            StatGroup::Efficiency => "Efficiency Splits",
            StatGroup::Availability => "Availability",
            StatGroup::Defense => "Defense",
            StatGroup::Rebounding => "Rebounding",
            StatGroup::Creation => "Creation",
            StatGroup::Impact => "Overall Impact",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = StatField> {
        StatField::ALL.into_iter().filter(move |f| f.group() == self)
    }
}

/// One player's season line. Every metric is either a finite number or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMasterRow {
    name: String,
    stats: [Option<f64>; StatField::COUNT],
}

impl PlayerMasterRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: [None; StatField::COUNT],
        }
    }

    /// Sets a metric; non-finite values are stored as absent.
    pub fn with_stat(mut self, field: StatField, value: f64) -> Self {
        self.stats[field.index()] = Some(value).filter(|v| v.is_finite());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: StatField) -> Option<f64> {
        self.stats[field.index()]
    }

    /// Present metrics, in declaration order.
    pub fn stats(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        StatField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
    }
}

impl Serialize for PlayerMasterRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(StatField::COUNT + 1))?;
        map.serialize_entry(NAME_COLUMN, &self.name)?;
        for field in StatField::ALL {
            map.serialize_entry(field.header(), &self.get(field))?;
        }
        map.end()
    }
}

/// Parses a trimmed decimal; empty, malformed and non-finite text is absent.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Maps a header-indexed row onto the fixed schema. Extra cells are ignored and
/// missing cells read as empty. Never fails.
pub fn normalize_row(header: &[String], cells: &[String]) -> PlayerMasterRow {
    let mut by_header: HashMap<&str, &str> = HashMap::with_capacity(header.len());
    for (idx, h) in header.iter().enumerate() {
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        by_header.insert(h.as_str(), cell);
    }

    let name = by_header.get(NAME_COLUMN).copied().unwrap_or("");
    let mut row = PlayerMasterRow::new(name);
    for field in StatField::ALL {
        let Some(raw) = by_header.get(field.header()) else {
            continue;
        };
        let value = parse_number(raw);
        if value.is_none() && !raw.trim().is_empty() {
            tracing::debug!(
                player = name,
                field = field.header(),
                raw = *raw,
                "non-numeric stat cell"
            );
        }
        row.stats[field.index()] = value;
    }
    row
}
