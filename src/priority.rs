use crate::item::WorkItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Caller-supplied ranking of constituencies and statuses.
///
/// Position in a list is the rank; values missing from a list share the rank
/// `len()` and therefore sort after every listed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOrder {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
}

/// Sort key for one work item. Field order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey<'a> {
    pub team: &'a str,
    pub category_rank: usize,
    pub status_rank: usize,
    pub name: &'a str,
}

impl PriorityOrder {
    pub fn new(categories: Vec<String>, statuses: Vec<String>) -> Self {
        Self {
            categories,
            statuses,
        }
    }

    /// All distinct observed values in ascending order.
    pub fn observed(items: &[WorkItem]) -> Self {
        let categories: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();
        let statuses: BTreeSet<&str> = items.iter().filter_map(|i| i.status.as_deref()).collect();
        Self {
            categories: categories.into_iter().map(ToOwned::to_owned).collect(),
            statuses: statuses.into_iter().map(ToOwned::to_owned).collect(),
        }
    }

    pub fn category_rank(&self, category: &str) -> usize {
        rank_in(&self.categories, category)
    }

    pub fn status_rank(&self, status: Option<&str>) -> usize {
        match status {
            Some(status) => rank_in(&self.statuses, status),
            None => self.statuses.len(),
        }
    }

    pub fn rank<'a>(&self, item: &'a WorkItem) -> PriorityKey<'a> {
        PriorityKey {
            team: &item.team,
            category_rank: self.category_rank(&item.category),
            status_rank: self.status_rank(item.status.as_deref()),
            name: &item.name,
        }
    }

    /// Items in scheduling order. The sort is stable, so duplicate keys keep
    /// their input order.
    pub fn sort_items<'a>(&self, items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
        let mut ordered: Vec<&WorkItem> = items.iter().collect();
        ordered.sort_by(|a, b| self.rank(a).cmp(&self.rank(b)));
        ordered
    }
}

fn rank_in(order: &[String], value: &str) -> usize {
    order
        .iter()
        .position(|candidate| candidate == value)
        .unwrap_or(order.len())
}
