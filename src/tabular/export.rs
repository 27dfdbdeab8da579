use super::iso;
use crate::error::ScheduleResult;
use crate::planner::PlannedTask;
use crate::totals::{EnrichedSchedule, TOTAL_STAYS_COLUMN};
use crate::views::{CalendarMatrix, TeamPivot};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const SCHEDULE_BASE_COLUMNS: [&str; 7] = [
    "Team",
    "Constituency",
    "Scheme Name",
    "Duration (Days)",
    "Start Date",
    "End Date",
    "Status",
];

pub fn write_schedule_csv<W: Write>(schedule: &EnrichedSchedule, writer: W) -> ScheduleResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = SCHEDULE_BASE_COLUMNS.to_vec();
    header.extend(schedule.stay_columns.iter().map(String::as_str));
    header.push(TOTAL_STAYS_COLUMN);
    writer.write_record(&header)?;

    for row in &schedule.items {
        let item = &row.item;
        let mut record = vec![
            item.team.clone(),
            item.category.clone(),
            item.name.clone(),
            item.duration_days.to_string(),
            iso(item.start_date),
            iso(item.end_date),
            item.status.clone(),
        ];
        record.extend(row.stays.iter().map(i64::to_string));
        record.push(row.total_stays.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Day, Date, then one column per team.
pub fn write_pivot_csv<W: Write>(pivot: &TeamPivot, writer: W) -> ScheduleResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header = vec!["Day".to_string(), "Date".to_string()];
    header.extend(pivot.teams.iter().cloned());
    writer.write_record(&header)?;
    for row in &pivot.rows {
        let mut record = vec![row.day.clone(), iso(row.date)];
        record.extend(row.cells.iter().cloned());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// `row_header` names the key column, e.g. `Scheme` or `Task`.
pub fn write_matrix_csv<W: Write>(
    matrix: &CalendarMatrix,
    row_header: &str,
    writer: W,
) -> ScheduleResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header = vec![row_header.to_string()];
    header.extend(matrix.column_labels());
    writer.write_record(&header)?;
    for row in matrix.rows() {
        let mut record = vec![row.key.clone()];
        record.extend(row.cells.iter().cloned());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_planned_tasks_csv<W: Write>(tasks: &[PlannedTask], writer: W) -> ScheduleResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "Constituency",
        "Scheme Name",
        "Team",
        "Task",
        "Duration (Days)",
        "Start Date",
        "End Date",
    ])?;
    for task in tasks {
        writer.write_record([
            task.category.clone(),
            task.name.clone(),
            task.team.clone(),
            task.task.clone(),
            task.duration_days.to_string(),
            iso(task.start_date),
            iso(task.end_date),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &EnrichedSchedule,
    path: P,
) -> ScheduleResult<()> {
    write_schedule_csv(schedule, File::create(path)?)
}

pub fn save_pivot_to_csv<P: AsRef<Path>>(pivot: &TeamPivot, path: P) -> ScheduleResult<()> {
    write_pivot_csv(pivot, File::create(path)?)
}

pub fn save_matrix_to_csv<P: AsRef<Path>>(
    matrix: &CalendarMatrix,
    row_header: &str,
    path: P,
) -> ScheduleResult<()> {
    write_matrix_csv(matrix, row_header, File::create(path)?)
}

pub fn save_planned_tasks_to_csv<P: AsRef<Path>>(
    tasks: &[PlannedTask],
    path: P,
) -> ScheduleResult<()> {
    write_planned_tasks_csv(tasks, File::create(path)?)
}

pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> ScheduleResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
