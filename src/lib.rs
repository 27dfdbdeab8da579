pub mod calendar;
pub mod config;
pub mod durations;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod item;
pub mod planner;
pub mod priority;
pub mod schedule;
pub mod scheduler;
pub mod tabular;
pub mod totals;
pub mod views;

pub use calendar::WorkCalendar;
pub use config::{PlannerConfig, PriorityConfig};
pub use durations::{DEFAULT_DURATION_DAYS, DurationSource, StatusDurations};
pub use error::{ScheduleError, ScheduleResult, parse_iso_date};
pub use item::{ScheduledItem, UNKNOWN_STATUS, WorkItem};
pub use planner::{PlanSelection, PlannedTask, TaskSpec, WeeklyPlan, plan_tasks};
pub use priority::{PriorityKey, PriorityOrder};
pub use schedule::{RunSummary, Schedule};
pub use scheduler::{TeamCursor, TeamScheduler, generate_schedule};
pub use tabular::{
    load_work_items_from_csv, load_work_items_from_json, read_work_items, save_json,
    save_matrix_to_csv, save_pivot_to_csv, save_planned_tasks_to_csv, save_schedule_to_csv,
};
pub use totals::{
    CsvTotalsSource, EnrichedItem, EnrichedSchedule, TotalsLayout, TotalsSource, TotalsTable,
    append_totals,
};
pub use views::{CalendarMatrix, DayAssignment, MatrixRow, SHUTDOWN_MARKER, TeamPivot};
