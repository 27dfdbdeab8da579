use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status label recorded for items that arrive without one.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One scheme to be scheduled, as read from the work-item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub team: String,
    /// Constituency the scheme belongs to.
    pub category: String,
    /// Scheme name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

impl WorkItem {
    pub fn new(
        team: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            team: team.into(),
            category: category.into(),
            name: name.into(),
            status: None,
            duration_days: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_duration(mut self, duration_days: u32) -> Self {
        self.duration_days = Some(duration_days);
        self
    }
}

/// A work item with its booked date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub team: String,
    pub category: String,
    pub name: String,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl ScheduledItem {
    /// Key of the item's row in the schedule matrix.
    pub fn row_key(&self) -> String {
        format!("{} - {}", self.category, self.name)
    }
}
