//! Per-scheme stay totals joined onto the schedule.
//!
//! Totals come from an external table keyed by scheme name. Numeric cells are
//! coerced leniently (anything unparsable counts as zero) and schemes without
//! a totals row are zero-filled, so the merge never fails once the source has
//! been read.

use crate::error::{ScheduleError, ScheduleResult};
use crate::item::ScheduledItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SCHEME_NAME_COLUMN: &str = "SCHEME NAME";
pub const TOTAL_STAYS_COLUMN: &str = "TOTAL STAYS";
pub const DEFAULT_STAY_COLUMNS: [&str; 8] = [
    "NORMAL STAY",
    "FLYING STAY",
    "UNDER WP HT NORMAL STAY",
    "UNDER CP HT NORMAL STAY",
    "UNDER WP HT FLYING STAY",
    "UNDER CP HT FLYING STAY",
    "MV NORMAL STAY",
    "MV FLYING STAY",
];

/// Which columns of the totals source to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsLayout {
    pub name_column: String,
    pub columns: Vec<String>,
}

impl Default for TotalsLayout {
    fn default() -> Self {
        Self {
            name_column: SCHEME_NAME_COLUMN.to_string(),
            columns: DEFAULT_STAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Summed stay counts per scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalsTable {
    columns: Vec<String>,
    by_scheme: HashMap<String, Vec<i64>>,
}

/// External provider of stay totals. Implementations are built once by the
/// caller and passed by reference into the merge.
pub trait TotalsSource {
    fn fetch(&self) -> ScheduleResult<TotalsTable>;
}

impl TotalsTable {
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            by_scheme: HashMap::new(),
        }
    }

    /// Build from raw text rows of `(scheme name, cells)`, `cells` aligned with
    /// `columns`. Rows without a scheme name are dropped; repeated names are
    /// summed.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut sums: HashMap<String, Vec<f64>> = HashMap::new();
        for (name, cells) in rows {
            let name = name.trim();
            if name.is_empty() {
                if cells.iter().any(|c| !c.trim().is_empty()) {
                    warn!("dropping totals row without a scheme name");
                }
                continue;
            }
            let entry = sums
                .entry(name.to_string())
                .or_insert_with(|| vec![0.0; columns.len()]);
            for (slot, cell) in entry.iter_mut().zip(cells.iter()) {
                *slot += coerce_numeric(cell);
            }
        }

        let by_scheme = sums
            .into_iter()
            .map(|(name, values)| (name, values.into_iter().map(|v| v as i64).collect()))
            .collect();
        Self { columns, by_scheme }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn scheme_count(&self) -> usize {
        self.by_scheme.len()
    }

    pub fn totals_for(&self, scheme: &str) -> Option<&[i64]> {
        self.by_scheme.get(scheme).map(Vec::as_slice)
    }
}

impl TotalsSource for TotalsTable {
    fn fetch(&self) -> ScheduleResult<TotalsTable> {
        Ok(self.clone())
    }
}

/// Totals read from a CSV export of the stay sheet.
#[derive(Debug, Clone)]
pub struct CsvTotalsSource {
    path: PathBuf,
    layout: TotalsLayout,
}

impl CsvTotalsSource {
    pub fn new(path: impl Into<PathBuf>, layout: TotalsLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TotalsSource for CsvTotalsSource {
    fn fetch(&self) -> ScheduleResult<TotalsTable> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| ScheduleError::MissingColumn(column.to_string()))
        };
        let name_idx = position(&self.layout.name_column)?;
        let column_idx = self
            .layout
            .columns
            .iter()
            .map(|c| position(c))
            .collect::<ScheduleResult<Vec<usize>>>()?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
            rows.push((cell(name_idx), column_idx.iter().map(|i| cell(*i)).collect()));
        }
        let table = TotalsTable::from_rows(self.layout.columns.clone(), rows);
        debug!(
            path = %self.path.display(),
            schemes = table.scheme_count(),
            "loaded stay totals"
        );
        Ok(table)
    }
}

/// A scheduled item with its stay totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: ScheduledItem,
    /// Aligned with `EnrichedSchedule::stay_columns`.
    pub stays: Vec<i64>,
    pub total_stays: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSchedule {
    pub stay_columns: Vec<String>,
    pub items: Vec<EnrichedItem>,
}

impl EnrichedSchedule {
    pub fn stay(&self, item_idx: usize, column: &str) -> Option<i64> {
        let column = self.stay_columns.iter().position(|c| c == column)?;
        self.items.get(item_idx).map(|item| item.stays[column])
    }
}

/// Left join on scheme name; unmatched schemes get zero everywhere.
pub fn append_totals(schedule: &[ScheduledItem], totals: &TotalsTable) -> EnrichedSchedule {
    let width = totals.columns().len();
    let mut unmatched = 0usize;
    let items = schedule
        .iter()
        .map(|item| {
            let stays = match totals.totals_for(&item.name) {
                Some(values) => values.to_vec(),
                None => {
                    unmatched += 1;
                    vec![0; width]
                }
            };
            EnrichedItem {
                item: item.clone(),
                total_stays: stays.iter().sum(),
                stays,
            }
        })
        .collect();
    if unmatched > 0 {
        debug!(unmatched, "schemes without stay totals were zero-filled");
    }
    EnrichedSchedule {
        stay_columns: totals.columns().to_vec(),
        items,
    }
}

fn coerce_numeric(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
