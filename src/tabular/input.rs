use crate::error::{ScheduleError, ScheduleResult};
use crate::item::WorkItem;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub const TEAM_COLUMN: &str = "Team";
pub const CONSTITUENCY_COLUMN: &str = "Constituency";
pub const SCHEME_NAME_COLUMN: &str = "Scheme Name";
pub const STATUS_COLUMN: &str = "Status";
pub const DURATION_COLUMN: &str = "Duration (Days)";

/// Column positions resolved once from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    team: usize,
    category: usize,
    name: usize,
    status: Option<usize>,
    duration: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> ScheduleResult<Self> {
        let find = |column: &str| headers.iter().position(|h| h.trim() == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| ScheduleError::MissingColumn(column.to_string()))
        };

        let index = Self {
            team: require(TEAM_COLUMN)?,
            category: require(CONSTITUENCY_COLUMN)?,
            name: require(SCHEME_NAME_COLUMN)?,
            status: find(STATUS_COLUMN),
            duration: find(DURATION_COLUMN),
        };
        if index.status.is_none() && index.duration.is_none() {
            return Err(ScheduleError::MissingColumn(format!(
                "{STATUS_COLUMN}' or '{DURATION_COLUMN}"
            )));
        }
        Ok(index)
    }
}

/// Read work items from CSV. Missing required columns fail before any row is
/// read; empty cells become absent values.
pub fn read_work_items<R: Read>(reader: R) -> ScheduleResult<Vec<WorkItem>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let index = ColumnIndex::from_headers(reader.headers()?)?;

    let mut items = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        // Header is line 1.
        let line = row_idx + 2;
        let required = |idx: usize, column: &str| {
            non_empty(&record, idx).ok_or_else(|| {
                ScheduleError::InvalidData(format!("row {line} has no value for '{column}'"))
            })
        };

        let mut item = WorkItem::new(
            required(index.team, TEAM_COLUMN)?,
            required(index.category, CONSTITUENCY_COLUMN)?,
            required(index.name, SCHEME_NAME_COLUMN)?,
        );
        item.status = index.status.and_then(|idx| non_empty(&record, idx));
        item.duration_days = index
            .duration
            .and_then(|idx| non_empty(&record, idx))
            .and_then(|raw| {
                let parsed = parse_duration(&raw);
                if parsed.is_none() {
                    warn!(line, value = %raw, "ignoring unusable duration");
                }
                parsed
            });
        items.push(item);
    }
    debug!(count = items.len(), "read work items");
    Ok(items)
}

pub fn load_work_items_from_csv<P: AsRef<Path>>(path: P) -> ScheduleResult<Vec<WorkItem>> {
    let file = File::open(path)?;
    read_work_items(file)
}

pub fn load_work_items_from_json<P: AsRef<Path>>(path: P) -> ScheduleResult<Vec<WorkItem>> {
    let file = File::open(path)?;
    let items: Vec<WorkItem> = serde_json::from_reader(file)?;
    for item in &items {
        if item.team.trim().is_empty()
            || item.category.trim().is_empty()
            || item.name.trim().is_empty()
        {
            return Err(ScheduleError::InvalidData(format!(
                "work item '{}' is missing team, constituency or scheme name",
                item.name
            )));
        }
    }
    Ok(items)
}

fn non_empty(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToOwned::to_owned)
}

/// Whole working days; spreadsheet exports often write `5` as `5.0`.
fn parse_duration(raw: &str) -> Option<u32> {
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value < 1.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value.trunc() as u32)
}
