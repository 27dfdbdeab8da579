use crate::calendar::WorkCalendar;
use crate::durations::StatusDurations;
use crate::error::{ScheduleResult, parse_iso_date};
use crate::item::WorkItem;
use crate::priority::PriorityOrder;
use crate::totals::TotalsLayout;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Ordered preference lists. `None` means "all observed values, ascending".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
}

/// Everything a scheduling run needs besides the work items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// ISO `YYYY-MM-DD`; parsed and checked before any scheduling.
    pub start_date: String,
    #[serde(default = "default_rest_day")]
    pub rest_day: Weekday,
    #[serde(default)]
    pub status_durations: StatusDurations,
    #[serde(default)]
    pub priority: PriorityConfig,
    #[serde(default)]
    pub totals: TotalsLayout,
}

fn default_rest_day() -> Weekday {
    Weekday::Sun
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            start_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            rest_day: default_rest_day(),
            status_durations: StatusDurations::default(),
            priority: PriorityConfig::default(),
            totals: TotalsLayout::default(),
        }
    }
}

impl PlannerConfig {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date: start_date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> ScheduleResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        self.schedule_start()?;
        self.status_durations.validate()
    }

    pub fn schedule_start(&self) -> ScheduleResult<NaiveDate> {
        parse_iso_date(&self.start_date)
    }

    pub fn calendar(&self) -> WorkCalendar {
        WorkCalendar::with_rest_day(self.rest_day)
    }

    /// Configured lists, falling back to the observed values per list.
    pub fn priority_order(&self, items: &[WorkItem]) -> PriorityOrder {
        let observed = PriorityOrder::observed(items);
        PriorityOrder::new(
            self.priority
                .constituency
                .clone()
                .unwrap_or(observed.categories),
            self.priority.status.clone().unwrap_or(observed.statuses),
        )
    }
}
