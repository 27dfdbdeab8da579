use crate::error::{ScheduleError, ScheduleResult};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Working-day calendar with a single weekly rest day.
///
/// Every date that does not fall on `rest_day` is a working day. Crews work
/// six days a week, so the default rest day is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendar {
    rest_day: Weekday,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::with_rest_day(Weekday::Sun)
    }
}

/// Working days in any run of seven consecutive dates.
const WORKDAYS_PER_WEEK: u32 = 6;

fn out_of_range(from: NaiveDate, n: u32) -> ScheduleError {
    ScheduleError::InvalidData(format!(
        "{n} working days after {from} is past the last supported date"
    ))
}

impl WorkCalendar {
    pub fn with_rest_day(rest_day: Weekday) -> Self {
        Self { rest_day }
    }

    pub fn rest_day(&self) -> Weekday {
        self.rest_day
    }

    pub fn is_workday(&self, date: NaiveDate) -> bool {
        date.weekday() != self.rest_day
    }

    /// The `n`th working day strictly after `from`; `n == 0` returns `from`.
    ///
    /// Whole weeks are skipped in one step, the remainder is walked a day at a
    /// time. Fails when the result would fall past `NaiveDate::MAX`.
    pub fn next_workday(&self, from: NaiveDate, n: u32) -> ScheduleResult<NaiveDate> {
        if n == 0 {
            return Ok(from);
        }
        // Keep at least one day to walk so the result lands on a workday.
        let weeks = (n - 1) / WORKDAYS_PER_WEEK;
        let mut remaining = n - weeks * WORKDAYS_PER_WEEK;
        let mut current = from
            .checked_add_days(Days::new(u64::from(weeks) * 7))
            .ok_or_else(|| out_of_range(from, n))?;
        while remaining > 0 {
            current = current.succ_opt().ok_or_else(|| out_of_range(from, n))?;
            if self.is_workday(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    pub fn first_workday_on_or_after(&self, date: NaiveDate) -> ScheduleResult<NaiveDate> {
        if self.is_workday(date) {
            return Ok(date);
        }
        self.next_workday(date, 1)
    }

    /// Last day of a block of `duration` working days that begins on `start`.
    ///
    /// `start` must be a working day and counts as day one.
    pub fn end_of_block(&self, start: NaiveDate, duration: u32) -> ScheduleResult<NaiveDate> {
        if duration <= 1 {
            return Ok(start);
        }
        self.next_workday(start, duration - 1)
    }

    /// Working days from `start` to `end` inclusive, ascending.
    pub fn workdays_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.dates_in_range(start, end)
            .into_iter()
            .filter(|date| self.is_workday(*date))
            .collect()
    }

    /// Every calendar date in an inclusive range, rest days included.
    pub fn dates_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            days.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        days
    }

    pub fn count_workdays(&self, start: NaiveDate, end: NaiveDate) -> usize {
        self.dates_in_range(start, end)
            .into_iter()
            .filter(|date| self.is_workday(*date))
            .count()
    }
}
