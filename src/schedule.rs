use crate::calendar::WorkCalendar;
use crate::config::PlannerConfig;
use crate::error::ScheduleResult;
use crate::item::{ScheduledItem, WorkItem};
use crate::scheduler::TeamScheduler;
use crate::tabular::frames;
use crate::totals::{EnrichedSchedule, TotalsSource, append_totals};
use crate::views::{CalendarMatrix, DayAssignment, TeamPivot, long_form};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub item_count: usize,
    pub team_count: usize,
    pub first_start: Option<NaiveDate>,
    pub last_end: Option<NaiveDate>,
    pub team_finish: BTreeMap<String, NaiveDate>,
}

impl RunSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("items={}", self.item_count));
        parts.push(format!("teams={}", self.team_count));
        if let Some(date) = self.first_start {
            parts.push(format!("start={}", date));
        }
        if let Some(date) = self.last_end {
            parts.push(format!("finish={}", date));
        }
        if !self.team_finish.is_empty() {
            let finishes = self
                .team_finish
                .iter()
                .map(|(team, date)| format!("{team}@{date}"))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("team_finish={}", finishes));
        }
        parts.join(", ")
    }
}

/// Result of one scheduling run.
#[derive(Debug, Clone)]
pub struct Schedule {
    calendar: WorkCalendar,
    schedule_start: NaiveDate,
    items: Vec<ScheduledItem>,
}

impl Schedule {
    /// Validate the configuration, then book every item.
    pub fn generate(items: &[WorkItem], config: &PlannerConfig) -> ScheduleResult<Self> {
        config.validate()?;
        let schedule_start = config.schedule_start()?;
        let calendar = config.calendar();
        let order = config.priority_order(items);

        let mut scheduler =
            TeamScheduler::new(&calendar, &config.status_durations, schedule_start);
        let booked = scheduler.schedule_all(items, &order)?;
        let schedule = Self {
            calendar,
            schedule_start,
            items: booked,
        };
        info!(summary = %schedule.summary().to_cli_summary(), "schedule generated");
        Ok(schedule)
    }

    pub fn from_parts(
        calendar: WorkCalendar,
        schedule_start: NaiveDate,
        items: Vec<ScheduledItem>,
    ) -> Self {
        Self {
            calendar,
            schedule_start,
            items,
        }
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn schedule_start(&self) -> NaiveDate {
        self.schedule_start
    }

    /// Booked items in priority order.
    pub fn items(&self) -> &[ScheduledItem] {
        &self.items
    }

    /// Booked items sorted by start date, then team.
    pub fn chronological(&self) -> Vec<&ScheduledItem> {
        let mut items: Vec<&ScheduledItem> = self.items.iter().collect();
        items.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.team.cmp(&b.team))
        });
        items
    }

    pub fn summary(&self) -> RunSummary {
        let mut team_finish: BTreeMap<String, NaiveDate> = BTreeMap::new();
        for item in &self.items {
            team_finish
                .entry(item.team.clone())
                .and_modify(|d| *d = (*d).max(item.end_date))
                .or_insert(item.end_date);
        }
        RunSummary {
            item_count: self.items.len(),
            team_count: team_finish.len(),
            first_start: self.items.iter().map(|i| i.start_date).min(),
            last_end: self.items.iter().map(|i| i.end_date).max(),
            team_finish,
        }
    }

    pub fn long_form(&self) -> Vec<DayAssignment> {
        long_form(&self.items, &self.calendar)
    }

    pub fn team_pivot(&self) -> TeamPivot {
        TeamPivot::from_long_form(&self.long_form())
    }

    pub fn matrix(&self) -> CalendarMatrix {
        CalendarMatrix::from_schedule(&self.items, &self.calendar)
    }

    /// Fetch totals from `source` and join them onto the schedule.
    pub fn with_totals(&self, source: &dyn TotalsSource) -> ScheduleResult<EnrichedSchedule> {
        let totals = source.fetch()?;
        Ok(append_totals(&self.items, &totals))
    }

    pub fn dataframe(&self) -> Result<DataFrame, PolarsError> {
        frames::scheduled_items_frame(&self.items)
    }
}
