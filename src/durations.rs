use crate::error::{ScheduleError, ScheduleResult};
use crate::item::WorkItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Duration used when neither the status mapping nor the item supplies one.
pub const DEFAULT_DURATION_DAYS: u32 = 2;

/// Working-day durations keyed by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusDurations {
    durations: BTreeMap<String, u32>,
}

/// Where a resolved duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    Status,
    Explicit,
    Default,
}

impl Default for StatusDurations {
    fn default() -> Self {
        Self::from_pairs([
            ("Not Done", 7),
            ("Pending", 5),
            ("In Progress", 3),
            ("Complete", 1),
        ])
    }
}

impl StatusDurations {
    pub fn empty() -> Self {
        Self {
            durations: BTreeMap::new(),
        }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            durations: pairs.into_iter().map(|(s, d)| (s.into(), d)).collect(),
        }
    }

    pub fn set(&mut self, status: impl Into<String>, days: u32) {
        self.durations.insert(status.into(), days);
    }

    pub fn get(&self, status: &str) -> Option<u32> {
        self.durations.get(status).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.durations.iter().map(|(s, d)| (s.as_str(), *d))
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        for (status, days) in &self.durations {
            if *days == 0 {
                return Err(ScheduleError::InvalidConfig(format!(
                    "duration for status '{status}' must be a positive number of days"
                )));
            }
        }
        Ok(())
    }

    /// Mapped status first, then the item's own positive duration, then the
    /// default.
    pub fn resolve(&self, item: &WorkItem) -> (u32, DurationSource) {
        if let Some(days) = item.status.as_deref().and_then(|s| self.get(s)) {
            return (days, DurationSource::Status);
        }
        match item.duration_days {
            Some(days) if days > 0 => (days, DurationSource::Explicit),
            _ => (DEFAULT_DURATION_DAYS, DurationSource::Default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_status_then_explicit_then_default() {
        let durations = StatusDurations::default();
        let mapped = WorkItem::new("T", "C", "S")
            .with_status("Pending")
            .with_duration(9);
        assert_eq!(durations.resolve(&mapped), (5, DurationSource::Status));

        let explicit = WorkItem::new("T", "C", "S")
            .with_status("Surveyed")
            .with_duration(4);
        assert_eq!(durations.resolve(&explicit), (4, DurationSource::Explicit));

        let zero = WorkItem::new("T", "C", "S").with_duration(0);
        assert_eq!(durations.resolve(&zero), (2, DurationSource::Default));

        let bare = WorkItem::new("T", "C", "S");
        assert_eq!(durations.resolve(&bare), (2, DurationSource::Default));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut durations = StatusDurations::default();
        durations.set("Pending", 0);
        assert!(matches!(
            durations.validate(),
            Err(ScheduleError::InvalidConfig(_))
        ));
    }
}
