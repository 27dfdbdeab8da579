use crate::calendar::WorkCalendar;
use crate::durations::{DurationSource, StatusDurations};
use crate::error::ScheduleResult;
use crate::item::{ScheduledItem, UNKNOWN_STATUS, WorkItem};
use crate::priority::PriorityOrder;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Last booked end date per team for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamCursor {
    last_end: HashMap<String, NaiveDate>,
}

impl TeamCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// End of the team's last booking, if it has one.
    pub fn last_end(&self, team: &str) -> Option<NaiveDate> {
        self.last_end.get(team).copied()
    }

    pub fn advance(&mut self, team: &str, end: NaiveDate) {
        self.last_end.insert(team.to_string(), end);
    }

    pub fn teams(&self) -> impl Iterator<Item = (&str, NaiveDate)> {
        self.last_end.iter().map(|(t, d)| (t.as_str(), *d))
    }

    pub fn len(&self) -> usize {
        self.last_end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_end.is_empty()
    }
}

/// Books back-to-back working-day blocks per team.
pub struct TeamScheduler<'a> {
    calendar: &'a WorkCalendar,
    durations: &'a StatusDurations,
    schedule_start: NaiveDate,
    cursor: TeamCursor,
}

impl<'a> TeamScheduler<'a> {
    pub fn new(
        calendar: &'a WorkCalendar,
        durations: &'a StatusDurations,
        schedule_start: NaiveDate,
    ) -> Self {
        Self::with_cursor(calendar, durations, schedule_start, TeamCursor::new())
    }

    /// Resume from an existing cursor, e.g. one returned by `into_cursor`.
    pub fn with_cursor(
        calendar: &'a WorkCalendar,
        durations: &'a StatusDurations,
        schedule_start: NaiveDate,
        cursor: TeamCursor,
    ) -> Self {
        Self {
            calendar,
            durations,
            schedule_start,
            cursor,
        }
    }

    pub fn cursor(&self) -> &TeamCursor {
        &self.cursor
    }

    pub fn into_cursor(self) -> TeamCursor {
        self.cursor
    }

    /// Book the next free block for the item's team and advance the cursor.
    ///
    /// Fails only when the block would run past the last representable date.
    pub fn book(&mut self, item: &WorkItem) -> ScheduleResult<ScheduledItem> {
        let (duration, source) = self.durations.resolve(item);
        if source == DurationSource::Default {
            debug!(
                team = %item.team,
                scheme = %item.name,
                duration,
                "no mapped status or explicit duration, using default"
            );
        }

        let start = match self.cursor.last_end(&item.team) {
            Some(last_end) => self.calendar.next_workday(last_end, 1)?,
            None => self.calendar.first_workday_on_or_after(self.schedule_start)?,
        };
        let end = self.calendar.end_of_block(start, duration)?;
        self.cursor.advance(&item.team, end);

        debug!(
            team = %item.team,
            scheme = %item.name,
            %start,
            %end,
            duration,
            "booked scheme"
        );

        Ok(ScheduledItem {
            team: item.team.clone(),
            category: item.category.clone(),
            name: item.name.clone(),
            duration_days: duration,
            start_date: start,
            end_date: end,
            status: item
                .status
                .clone()
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        })
    }

    /// Book every item in priority order. The result keeps that order, not
    /// chronological order.
    pub fn schedule_all(
        &mut self,
        items: &[WorkItem],
        order: &PriorityOrder,
    ) -> ScheduleResult<Vec<ScheduledItem>> {
        order
            .sort_items(items)
            .into_iter()
            .map(|item| self.book(item))
            .collect()
    }
}

pub fn generate_schedule(
    items: &[WorkItem],
    schedule_start: NaiveDate,
    durations: &StatusDurations,
    order: &PriorityOrder,
    calendar: &WorkCalendar,
) -> ScheduleResult<Vec<ScheduledItem>> {
    let mut scheduler = TeamScheduler::new(calendar, durations, schedule_start);
    scheduler.schedule_all(items, order)
}
