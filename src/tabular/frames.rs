use super::iso;
use crate::item::ScheduledItem;
use crate::planner::PlannedTask;
use crate::totals::{EnrichedSchedule, TOTAL_STAYS_COLUMN};
use crate::views::{CalendarMatrix, DayAssignment, TeamPivot};
use polars::prelude::*;

fn str_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn i64_column(name: &str, values: Vec<i64>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn base_columns<'a, I>(items: I) -> Vec<Column>
where
    I: Iterator<Item = &'a ScheduledItem> + Clone,
{
    let strings = |f: fn(&ScheduledItem) -> String| items.clone().map(f).collect::<Vec<_>>();
    vec![
        str_column("Team", strings(|i| i.team.clone())),
        str_column("Constituency", strings(|i| i.category.clone())),
        str_column("Scheme Name", strings(|i| i.name.clone())),
        i64_column(
            "Duration (Days)",
            items.clone().map(|i| i64::from(i.duration_days)).collect(),
        ),
        str_column("Start Date", strings(|i| iso(i.start_date))),
        str_column("End Date", strings(|i| iso(i.end_date))),
        str_column("Status", strings(|i| i.status.clone())),
    ]
}

pub fn scheduled_items_frame(items: &[ScheduledItem]) -> PolarsResult<DataFrame> {
    DataFrame::new(base_columns(items.iter()))
}

/// Schedule columns followed by one integer column per stay column and
/// `TOTAL STAYS`.
pub fn enriched_frame(schedule: &EnrichedSchedule) -> PolarsResult<DataFrame> {
    let mut columns = base_columns(schedule.items.iter().map(|row| &row.item));
    for (idx, name) in schedule.stay_columns.iter().enumerate() {
        columns.push(i64_column(
            name,
            schedule.items.iter().map(|row| row.stays[idx]).collect(),
        ));
    }
    columns.push(i64_column(
        TOTAL_STAYS_COLUMN,
        schedule.items.iter().map(|row| row.total_stays).collect(),
    ));
    DataFrame::new(columns)
}

pub fn long_form_frame(rows: &[DayAssignment]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        str_column("Date", rows.iter().map(|r| iso(r.date)).collect()),
        str_column("Scheme Name", rows.iter().map(|r| r.name.clone()).collect()),
        str_column("Team", rows.iter().map(|r| r.team.clone()).collect()),
    ])
}

pub fn pivot_frame(pivot: &TeamPivot) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        str_column("Day", pivot.rows.iter().map(|r| r.day.clone()).collect()),
        str_column("Date", pivot.rows.iter().map(|r| iso(r.date)).collect()),
    ];
    for (idx, team) in pivot.teams.iter().enumerate() {
        columns.push(str_column(
            team,
            pivot.rows.iter().map(|r| r.cells[idx].clone()).collect(),
        ));
    }
    DataFrame::new(columns)
}

pub fn matrix_frame(matrix: &CalendarMatrix, row_header: &str) -> PolarsResult<DataFrame> {
    let mut columns = vec![str_column(
        row_header,
        matrix.rows().iter().map(|r| r.key.clone()).collect(),
    )];
    for (idx, label) in matrix.column_labels().iter().enumerate() {
        columns.push(str_column(
            label,
            matrix.rows().iter().map(|r| r.cells[idx].clone()).collect(),
        ));
    }
    DataFrame::new(columns)
}

pub fn planned_tasks_frame(tasks: &[PlannedTask]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        str_column("Constituency", tasks.iter().map(|t| t.category.clone()).collect()),
        str_column("Scheme Name", tasks.iter().map(|t| t.name.clone()).collect()),
        str_column("Team", tasks.iter().map(|t| t.team.clone()).collect()),
        str_column("Task", tasks.iter().map(|t| t.task.clone()).collect()),
        i64_column(
            "Duration (Days)",
            tasks.iter().map(|t| i64::from(t.duration_days)).collect(),
        ),
        str_column("Start Date", tasks.iter().map(|t| iso(t.start_date)).collect()),
        str_column("End Date", tasks.iter().map(|t| iso(t.end_date)).collect()),
    ])
}
