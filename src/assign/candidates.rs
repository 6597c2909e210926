//! Per-area candidate queues.
//!
//! For every area, the index holds the eligible reviewers in consumption
//! order: first-choice signups before second-choice, ties in signup order
//! (stable sort). A reviewer is eligible when they rated the area and are
//! on its whitelist, or when accept-all mode is on.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::models::{AreaTable, Rating, ReviewerKey, ReviewerRegistry};

/// Whitelist retention diagnostic for one area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionStats {
    /// Signups that survived the whitelist filter.
    pub accepted: usize,
    /// All signups that rated the area.
    pub total: usize,
}

impl RetentionStats {
    /// Accepted fraction as a percentage (0 when nobody rated the area).
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total as f64 * 100.0
        }
    }
}

/// Ordered candidate queues, one per area.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    queues: BTreeMap<String, VecDeque<ReviewerKey>>,
    retention: BTreeMap<String, RetentionStats>,
}

impl CandidateIndex {
    /// Builds the index from the registry and area table.
    ///
    /// Reviewers are visited in signup order, so the stable sort on rating
    /// leaves equal-rating candidates in signup order.
    pub fn build(registry: &ReviewerRegistry, areas: &AreaTable, accept_all: bool) -> Self {
        let mut staged: BTreeMap<String, Vec<(Rating, ReviewerKey)>> = BTreeMap::new();
        let mut retention: BTreeMap<String, RetentionStats> = BTreeMap::new();
        for (name, _) in areas.iter() {
            staged.insert(name.clone(), Vec::new());
            retention.insert(name.clone(), RetentionStats::default());
        }

        for reviewer in registry.iter() {
            for choice in &reviewer.choices {
                let Some(area) = areas.get(&choice.area) else {
                    continue;
                };
                if let Some(stats) = retention.get_mut(&area.name) {
                    stats.total += 1;
                }
                if accept_all || area.whitelist.contains(&reviewer.key) {
                    if let Some(list) = staged.get_mut(&area.name) {
                        list.push((choice.rating, reviewer.key.clone()));
                        if let Some(stats) = retention.get_mut(&area.name) {
                            stats.accepted += 1;
                        }
                    }
                }
            }
        }

        let mut queues = BTreeMap::new();
        for (name, mut list) in staged {
            list.sort_by_key(|(rating, _)| *rating);
            queues.insert(name, list.into_iter().map(|(_, key)| key).collect());
        }

        for (name, stats) in &retention {
            tracing::debug!(
                area = %name,
                accepted = stats.accepted,
                total = stats.total,
                percent = format!("{:.2}", stats.percent()),
                "whitelist retention"
            );
        }

        Self { queues, retention }
    }

    /// Pops the best remaining candidate for an area that is not already
    /// used, discarding used candidates along the way.
    pub fn pop_next(&mut self, area: &str, used: &HashSet<ReviewerKey>) -> Option<ReviewerKey> {
        let queue = self.queues.get_mut(area)?;
        while let Some(key) = queue.pop_front() {
            if !used.contains(&key) {
                return Some(key);
            }
        }
        None
    }

    /// Remaining (possibly already-used) candidates for an area.
    pub fn remaining(&self, area: &str) -> usize {
        self.queues.get(area).map_or(0, VecDeque::len)
    }

    /// Current queue contents for an area, in consumption order.
    pub fn candidates<'a>(&'a self, area: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.queues
            .get(area)
            .into_iter()
            .flat_map(|q| q.iter().map(String::as_str))
    }

    /// Retention diagnostic for an area.
    pub fn retention(&self, area: &str) -> RetentionStats {
        self.retention.get(area).copied().unwrap_or_default()
    }
}
