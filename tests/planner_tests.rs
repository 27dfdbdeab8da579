use chrono::{NaiveDate, Weekday};
use crew_schedule::tabular::frames::planned_tasks_frame;
use crew_schedule::{
    PlanSelection, SHUTDOWN_MARKER, ScheduleError, TaskSpec, WorkCalendar, plan_tasks,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn select(category: &str, name: &str, team: &str, start: NaiveDate) -> PlanSelection {
    PlanSelection {
        category: category.into(),
        name: name.into(),
        team: team.into(),
        start_date: start,
    }
}

fn tasks() -> Vec<TaskSpec> {
    vec![TaskSpec::new("Survey", 2), TaskSpec::new("Build", 3)]
}

fn selections() -> Vec<PlanSelection> {
    vec![
        // Saturday start, the Survey block jumps the Sunday
        select("North", "S1", "T1", d(2024, 1, 6)),
        select("North", "S2", "T2", d(2024, 1, 8)),
        select("South", "S3", "T3", d(2024, 1, 2)),
    ]
}

#[test]
fn tasks_run_back_to_back_per_scheme() {
    let plan = plan_tasks(&tasks(), &selections(), &WorkCalendar::default()).unwrap();
    assert_eq!(plan.tasks.len(), 6);

    let s1: Vec<_> = plan.tasks.iter().filter(|t| t.name == "S1").collect();
    assert_eq!(s1[0].task, "Survey");
    assert_eq!((s1[0].start_date, s1[0].end_date), (d(2024, 1, 6), d(2024, 1, 8)));
    assert_eq!(s1[1].task, "Build");
    assert_eq!((s1[1].start_date, s1[1].end_date), (d(2024, 1, 9), d(2024, 1, 11)));
    assert!(plan.tasks.iter().all(|t| t.team != "T1" || t.name == "S1"));
}

#[test]
fn start_on_rest_day_moves_to_next_workday() {
    let selection = vec![select("North", "S1", "T1", d(2024, 1, 7))];
    let plan = plan_tasks(&tasks(), &selection, &WorkCalendar::default()).unwrap();
    assert_eq!(plan.tasks[0].start_date, d(2024, 1, 8));

    let friday_rest = WorkCalendar::with_rest_day(Weekday::Fri);
    let selection = vec![select("North", "S1", "T1", d(2024, 1, 5))];
    let plan = plan_tasks(&tasks(), &selection, &friday_rest).unwrap();
    assert_eq!(plan.tasks[0].start_date, d(2024, 1, 6));
}

#[test]
fn shutdown_date_is_latest_end_per_constituency() {
    let plan = plan_tasks(&tasks(), &selections(), &WorkCalendar::default()).unwrap();
    let shutdowns = plan.shutdown_dates();
    assert_eq!(shutdowns.get("North"), Some(&d(2024, 1, 12)));
    assert_eq!(shutdowns.get("South"), Some(&d(2024, 1, 6)));
}

#[test]
fn matrix_marks_shutdown_across_the_constituency() {
    let plan = plan_tasks(&tasks(), &selections(), &WorkCalendar::default()).unwrap();
    let matrix = plan.matrix();
    assert_eq!(matrix.columns().first(), Some(&d(2024, 1, 2)));
    assert_eq!(matrix.columns().last(), Some(&d(2024, 1, 12)));

    assert_eq!(matrix.cell("S1 - Build", d(2024, 1, 9)), Some("T1"));
    assert_eq!(matrix.cell("S2 - Build", d(2024, 1, 12)), Some(SHUTDOWN_MARKER));
    assert_eq!(matrix.cell("S1 - Survey", d(2024, 1, 12)), Some(SHUTDOWN_MARKER));
    assert_eq!(matrix.cell("S3 - Build", d(2024, 1, 6)), Some(SHUTDOWN_MARKER));
    assert_eq!(matrix.cell("S3 - Build", d(2024, 1, 12)), Some(""));
    assert_eq!(matrix.cell("S1 - Survey", d(2024, 1, 7)), Some(""));
}

#[test]
fn zero_length_task_is_rejected() {
    let tasks = vec![TaskSpec::new("Survey", 0)];
    let err = plan_tasks(&tasks, &selections(), &WorkCalendar::default()).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidConfig(_)));
}

#[test]
fn planned_tasks_frame_has_one_row_per_task() {
    let plan = plan_tasks(&tasks(), &selections(), &WorkCalendar::default()).unwrap();
    let df = planned_tasks_frame(&plan.tasks).unwrap();
    assert_eq!(df.height(), 6);
    let first_task = df.column("Task").unwrap().str().unwrap().get(0);
    assert_eq!(first_task, Some("Survey"));
}

#[test]
fn no_selections_yield_empty_plan() {
    let plan = plan_tasks(&tasks(), &[], &WorkCalendar::default()).unwrap();
    assert!(plan.tasks.is_empty());
    assert!(plan.shutdown_dates().is_empty());
    assert!(plan.matrix().is_empty());
}

#[test]
fn huge_task_duration_is_an_error() {
    let tasks = vec![TaskSpec::new("Survey", 2), TaskSpec::new("Build", 200_000_000)];
    let err = plan_tasks(&tasks, &selections(), &WorkCalendar::default()).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidData(_)), "{err}");
}
