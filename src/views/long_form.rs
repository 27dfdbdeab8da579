use crate::calendar::WorkCalendar;
use crate::item::ScheduledItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A scheme worked by a team on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub date: NaiveDate,
    pub name: String,
    pub team: String,
}

/// Expand every item into one row per working day of its range, sorted by
/// date. Rows on the same date keep schedule order.
pub fn long_form(items: &[ScheduledItem], calendar: &WorkCalendar) -> Vec<DayAssignment> {
    let mut rows: Vec<DayAssignment> = items
        .iter()
        .flat_map(|item| {
            calendar
                .workdays_in_range(item.start_date, item.end_date)
                .into_iter()
                .map(move |date| DayAssignment {
                    date,
                    name: item.name.clone(),
                    team: item.team.clone(),
                })
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    /// Full weekday name, e.g. `Monday`.
    pub day: String,
    pub date: NaiveDate,
    /// One entry per pivot team, in `TeamPivot::teams` order.
    pub cells: Vec<String>,
}

/// Day-by-team view of the long form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPivot {
    pub teams: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl TeamPivot {
    /// One row per active date. Each cell joins the names a team works that
    /// day with `", "`; idle teams get an empty string.
    pub fn from_long_form(rows: &[DayAssignment]) -> Self {
        let teams: Vec<String> = rows
            .iter()
            .map(|row| row.team.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect();

        let mut by_date: BTreeMap<NaiveDate, BTreeMap<&str, Vec<&str>>> = BTreeMap::new();
        for row in rows {
            by_date
                .entry(row.date)
                .or_default()
                .entry(row.team.as_str())
                .or_default()
                .push(row.name.as_str());
        }

        let rows = by_date
            .into_iter()
            .map(|(date, names_by_team)| PivotRow {
                day: date.format("%A").to_string(),
                date,
                cells: teams
                    .iter()
                    .map(|team| {
                        names_by_team
                            .get(team.as_str())
                            .map(|names| names.join(", "))
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect();

        Self { teams, rows }
    }

    pub fn cell(&self, date: NaiveDate, team: &str) -> Option<&str> {
        let column = self.teams.iter().position(|t| t == team)?;
        self.rows
            .iter()
            .find(|row| row.date == date)
            .map(|row| row.cells[column].as_str())
    }
}
