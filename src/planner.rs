//! Multi-task weekly planner.
//!
//! Each selected scheme gets one team and one start date; the planner runs the
//! configured task list back to back for that team. The last end date in a
//! constituency is its shutdown date, which the planner matrix marks with
//! [`SHUTDOWN_MARKER`] across all of the constituency's rows.

use crate::calendar::WorkCalendar;
use crate::error::{ScheduleError, ScheduleResult};
use crate::views::matrix::MatrixSpan;
use crate::views::{CalendarMatrix, SHUTDOWN_MARKER};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A named step with a fixed working-day duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub duration_days: u32,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, duration_days: u32) -> Self {
        Self {
            name: name.into(),
            duration_days,
        }
    }
}

/// A scheme picked for planning, with its crew and earliest start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSelection {
    pub category: String,
    pub name: String,
    pub team: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub category: String,
    pub name: String,
    pub team: String,
    pub task: String,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PlannedTask {
    pub fn row_key(&self) -> String {
        format!("{} - {}", self.name, self.task)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub tasks: Vec<PlannedTask>,
    #[serde(skip)]
    calendar: WorkCalendar,
}

pub fn plan_tasks(
    tasks: &[TaskSpec],
    selections: &[PlanSelection],
    calendar: &WorkCalendar,
) -> ScheduleResult<WeeklyPlan> {
    if let Some(task) = tasks.iter().find(|t| t.duration_days == 0) {
        return Err(ScheduleError::InvalidConfig(format!(
            "task '{}' must last at least one working day",
            task.name
        )));
    }

    let mut planned = Vec::with_capacity(tasks.len() * selections.len());
    for selection in selections {
        let mut previous_end: Option<NaiveDate> = None;
        for task in tasks {
            let start = match previous_end {
                Some(end) => calendar.next_workday(end, 1)?,
                None => calendar.first_workday_on_or_after(selection.start_date)?,
            };
            let end = calendar.end_of_block(start, task.duration_days)?;
            planned.push(PlannedTask {
                category: selection.category.clone(),
                name: selection.name.clone(),
                team: selection.team.clone(),
                task: task.name.clone(),
                duration_days: task.duration_days,
                start_date: start,
                end_date: end,
            });
            previous_end = Some(end);
        }
        debug!(
            scheme = %selection.name,
            team = %selection.team,
            tasks = tasks.len(),
            "planned scheme"
        );
    }

    Ok(WeeklyPlan {
        tasks: planned,
        calendar: *calendar,
    })
}

impl WeeklyPlan {
    /// Latest task end per constituency.
    pub fn shutdown_dates(&self) -> BTreeMap<String, NaiveDate> {
        let mut dates: BTreeMap<String, NaiveDate> = BTreeMap::new();
        for task in &self.tasks {
            dates
                .entry(task.category.clone())
                .and_modify(|d| *d = (*d).max(task.end_date))
                .or_insert(task.end_date);
        }
        dates
    }

    /// Rows keyed `"Name - Task"`; shutdown dates override the team id.
    pub fn matrix(&self) -> CalendarMatrix {
        let mut matrix = CalendarMatrix::from_spans(
            self.tasks.iter().map(|task| MatrixSpan {
                key: task.row_key(),
                start: task.start_date,
                end: task.end_date,
                value: task.team.as_str(),
            }),
            &self.calendar,
        );

        let shutdowns = self.shutdown_dates();
        let row_shutdown: HashMap<String, NaiveDate> = self
            .tasks
            .iter()
            .filter_map(|task| {
                shutdowns
                    .get(&task.category)
                    .map(|date| (task.row_key(), *date))
            })
            .collect();
        matrix.override_cells(SHUTDOWN_MARKER, |key, date| {
            row_shutdown.get(key) == Some(&date)
        });
        matrix
    }
}
