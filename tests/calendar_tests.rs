use chrono::{Datelike, NaiveDate, Weekday};
use crew_schedule::ScheduleError;
use crew_schedule::calendar::WorkCalendar;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_calendar_rests_on_sunday_only() {
    let cal = WorkCalendar::default();
    assert_eq!(cal.rest_day(), Weekday::Sun);
    // 2024-01-06 is a Saturday, 2024-01-07 is a Sunday
    assert!(cal.is_workday(d(2024, 1, 6)));
    assert!(!cal.is_workday(d(2024, 1, 7)));
}

#[test]
fn next_workday_skips_rest_day() {
    let cal = WorkCalendar::default();
    let sat = d(2024, 1, 6);
    let next = cal.next_workday(sat, 1).unwrap();
    assert_eq!(next.weekday(), Weekday::Mon);
    assert_eq!(next, d(2024, 1, 8));
}

#[test]
fn next_workday_counts_only_workdays() {
    let cal = WorkCalendar::default();
    // Seven working days after Friday 2024-01-05 with one Sunday in between
    assert_eq!(cal.next_workday(d(2024, 1, 5), 7).unwrap(), d(2024, 1, 13));
    assert_eq!(cal.next_workday(d(2024, 1, 5), 0).unwrap(), d(2024, 1, 5));
}

#[test]
fn custom_rest_day_is_respected() {
    let cal = WorkCalendar::with_rest_day(Weekday::Fri);
    // 2024-01-05 is a Friday
    assert!(!cal.is_workday(d(2024, 1, 5)));
    assert!(cal.is_workday(d(2024, 1, 7)));
    assert_eq!(cal.next_workday(d(2024, 1, 4), 1).unwrap(), d(2024, 1, 6));
}

#[test]
fn first_workday_on_or_after_keeps_workdays() {
    let cal = WorkCalendar::default();
    assert_eq!(cal.first_workday_on_or_after(d(2024, 1, 3)).unwrap(), d(2024, 1, 3));
    assert_eq!(cal.first_workday_on_or_after(d(2024, 1, 7)).unwrap(), d(2024, 1, 8));
}

#[test]
fn workday_ranges_exclude_rest_days() {
    let cal = WorkCalendar::default();
    let days = cal.workdays_in_range(d(2024, 1, 5), d(2024, 1, 9));
    assert_eq!(
        days,
        vec![d(2024, 1, 5), d(2024, 1, 6), d(2024, 1, 8), d(2024, 1, 9)]
    );
    assert_eq!(cal.dates_in_range(d(2024, 1, 5), d(2024, 1, 9)).len(), 5);
    assert_eq!(cal.count_workdays(d(2024, 1, 1), d(2024, 1, 14)), 12);
    assert!(cal.workdays_in_range(d(2024, 1, 9), d(2024, 1, 5)).is_empty());
}

#[test]
fn block_length_matches_workdays_in_range() {
    let cal = WorkCalendar::default();
    let start = d(2024, 1, 2);
    for duration in 1..=20u32 {
        let end = cal.end_of_block(start, duration).unwrap();
        assert_eq!(cal.count_workdays(start, end), duration as usize);
        assert!(cal.is_workday(end));
    }
}

#[test]
fn walking_past_the_last_date_is_an_error() {
    let cal = WorkCalendar::default();
    assert!(matches!(
        cal.next_workday(d(2024, 1, 1), u32::MAX),
        Err(ScheduleError::InvalidData(_))
    ));
    assert!(cal.next_workday(NaiveDate::MAX, 1).is_err());
    assert!(cal.end_of_block(d(2024, 1, 1), 200_000_000).is_err());
}

#[test]
fn range_ending_on_last_date_stops_there() {
    let cal = WorkCalendar::default();
    let start = NaiveDate::MAX.pred_opt().unwrap();
    assert_eq!(
        cal.dates_in_range(start, NaiveDate::MAX),
        vec![start, NaiveDate::MAX]
    );
}
