use chrono::{NaiveDate, Weekday};
use crew_schedule::{PlannerConfig, ScheduleError, StatusDurations, WorkItem, parse_iso_date};
use std::io::Write;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn defaults_match_crew_conventions() {
    let config = PlannerConfig::starting(d(2024, 3, 4));
    assert_eq!(config.start_date, "2024-03-04");
    assert_eq!(config.rest_day, Weekday::Sun);
    assert_eq!(config.status_durations.get("Not Done"), Some(7));
    assert_eq!(config.status_durations.get("Pending"), Some(5));
    assert_eq!(config.status_durations.get("In Progress"), Some(3));
    assert_eq!(config.status_durations.get("Complete"), Some(1));
    assert!(config.validate().is_ok());
}

#[test]
fn iso_dates_only() {
    assert_eq!(parse_iso_date(" 2024-01-09 ").unwrap(), d(2024, 1, 9));
    for bad in ["09/01/2024", "2024-13-01", "", "tomorrow"] {
        assert!(
            matches!(parse_iso_date(bad), Err(ScheduleError::InvalidDate { .. })),
            "accepted {bad:?}"
        );
    }
}

#[test]
fn save_then_load_preserves_settings() {
    let mut config = PlannerConfig::starting(d(2024, 1, 1));
    config.rest_day = Weekday::Fri;
    config.status_durations = StatusDurations::from_pairs([("Surveyed", 4)]);
    config.priority.constituency = Some(vec!["North".into()]);

    let file = NamedTempFile::new().unwrap();
    config.save(file.path()).unwrap();
    let loaded = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn minimal_json_fills_in_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"start_date":"2024-01-01"}}"#).unwrap();
    let config = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(config.rest_day, Weekday::Sun);
    assert_eq!(config.status_durations, StatusDurations::default());
    assert_eq!(config.totals.columns.len(), 8);
}

#[test]
fn load_rejects_bad_start_date_and_zero_duration() {
    let mut bad_date = NamedTempFile::new().unwrap();
    write!(bad_date, r#"{{"start_date":"1/1/2024"}}"#).unwrap();
    assert!(matches!(
        PlannerConfig::load(bad_date.path()),
        Err(ScheduleError::InvalidDate { .. })
    ));

    let mut zero = NamedTempFile::new().unwrap();
    write!(
        zero,
        r#"{{"start_date":"2024-01-01","status_durations":{{"Pending":0}}}}"#
    )
    .unwrap();
    assert!(matches!(
        PlannerConfig::load(zero.path()),
        Err(ScheduleError::InvalidConfig(_))
    ));
}

#[test]
fn priority_lists_fall_back_to_observed_values() {
    let items = vec![
        WorkItem::new("A", "South", "S1").with_status("Pending"),
        WorkItem::new("A", "North", "S2").with_status("Complete"),
    ];
    let mut config = PlannerConfig::starting(d(2024, 1, 1));
    config.priority.status = Some(vec!["Pending".into()]);
    let order = config.priority_order(&items);
    assert_eq!(order.categories, vec!["North", "South"]);
    assert_eq!(order.statuses, vec!["Pending"]);
}
