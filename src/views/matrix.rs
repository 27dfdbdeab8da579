use crate::calendar::WorkCalendar;
use crate::item::ScheduledItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cell value written over the team id on a category's shutdown date.
pub const SHUTDOWN_MARKER: &str = "SHUTDOWN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub key: String,
    /// One entry per matrix column; empty string when unset.
    pub cells: Vec<String>,
}

/// Rows of schemes against every calendar date of the horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMatrix {
    columns: Vec<NaiveDate>,
    rows: Vec<MatrixRow>,
}

/// A booked range to be painted onto one matrix row.
pub(crate) struct MatrixSpan<'a> {
    pub key: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: &'a str,
}

impl CalendarMatrix {
    /// Rows keyed `"Category - Name"`, cells hold the booked team.
    pub fn from_schedule(items: &[ScheduledItem], calendar: &WorkCalendar) -> Self {
        Self::from_spans(
            items.iter().map(|item| MatrixSpan {
                key: item.row_key(),
                start: item.start_date,
                end: item.end_date,
                value: item.team.as_str(),
            }),
            calendar,
        )
    }

    pub(crate) fn from_spans<'a, I>(spans: I, calendar: &WorkCalendar) -> Self
    where
        I: IntoIterator<Item = MatrixSpan<'a>>,
    {
        let spans: Vec<MatrixSpan<'a>> = spans.into_iter().collect();
        let (Some(first), Some(last)) = (
            spans.iter().map(|s| s.start).min(),
            spans.iter().map(|s| s.end).max(),
        ) else {
            return Self::default();
        };

        let columns = calendar.dates_in_range(first, last);
        let mut painted: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for span in &spans {
            let cells = painted
                .entry(span.key.clone())
                .or_insert_with(|| vec![String::new(); columns.len()]);
            for date in calendar.workdays_in_range(span.start, span.end) {
                let idx = (date - first).num_days() as usize;
                cells[idx] = span.value.to_string();
            }
        }

        Self {
            columns,
            rows: painted
                .into_iter()
                .map(|(key, cells)| MatrixRow { key, cells })
                .collect(),
        }
    }

    pub fn columns(&self) -> &[NaiveDate] {
        &self.columns
    }

    /// Column headers as ISO `YYYY-MM-DD` strings.
    pub fn column_labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    /// `None` when the row or date is outside the matrix.
    pub fn cell(&self, key: &str, date: NaiveDate) -> Option<&str> {
        let column = self.columns.iter().position(|d| *d == date)?;
        self.row(key).map(|row| row.cells[column].as_str())
    }

    /// Overwrite every cell for which `matches(row_key, date)` holds.
    pub(crate) fn override_cells<F>(&mut self, marker: &str, matches: F)
    where
        F: Fn(&str, NaiveDate) -> bool,
    {
        for row in &mut self.rows {
            for (cell, date) in row.cells.iter_mut().zip(self.columns.iter()) {
                if matches(&row.key, *date) {
                    *cell = marker.to_string();
                }
            }
        }
    }
}
