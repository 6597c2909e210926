//! Round quota computation.
//!
//! Areas differ widely in paper count; giving each one reviewer per round
//! would fill small areas long before large ones. Each area instead
//! receives a per-round quota proportional to its relative demand, so all
//! areas approach their targets at comparable rates.

use std::collections::BTreeMap;

use crate::models::AreaTable;

/// Per-area reviewers-per-round quotas.
#[derive(Debug, Clone, Default)]
pub struct RoundPlan {
    quotas: BTreeMap<String, u32>,
}

impl RoundPlan {
    /// Creates an empty plan; unknown areas default to a quota of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit quota for one area.
    pub fn with_quota(mut self, area: impl Into<String>, quota: u32) -> Self {
        self.quotas.insert(area.into().to_lowercase(), quota);
        self
    }

    /// Computes quotas from area demand.
    ///
    /// `reviewers_needed = (paper_count * paper_load) / reviewer_load`
    /// (truncating); the least-demanding area anchors the scale and every
    /// area gets `reviewers_needed / min_needed`, at least 1. Priority
    /// areas are multiplied by `priority_factor`.
    ///
    /// When the demand ratio between the largest and smallest area is
    /// below 2 the quotas cannot meaningfully differentiate areas; a
    /// warning is logged and the computed quotas are used as-is.
    pub fn compute(areas: &AreaTable, priority_factor: u32) -> Self {
        let mut needed: BTreeMap<String, u32> = BTreeMap::new();
        for (name, area) in areas.iter() {
            if area.reviewer_load == 0 {
                continue;
            }
            needed.insert(name.clone(), area.required_review_units() / area.reviewer_load);
        }

        if needed.is_empty() {
            return Self::default();
        }

        // An area with zero demand would anchor the scale at zero; clamp.
        let min_needed = needed.values().min().copied().unwrap_or(1).max(1);
        let max_needed = needed.values().max().copied().unwrap_or(1);
        if max_needed / min_needed < 2 {
            tracing::warn!(
                min = min_needed,
                max = max_needed,
                "demand ratio below 2; per-round quotas will barely differentiate areas"
            );
        }

        let mut quotas = BTreeMap::new();
        for (name, n) in needed {
            let mut quota = (n / min_needed).max(1);
            if areas.get(&name).is_some_and(|a| a.is_priority) {
                quota *= priority_factor;
            }
            quotas.insert(name, quota);
        }

        Self { quotas }
    }

    /// Quota for an area (1 for unknown areas).
    pub fn quota(&self, area: &str) -> u32 {
        self.quotas.get(area).copied().unwrap_or(1)
    }

    /// Iterates (area, quota) pairs in area-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u32)> {
        self.quotas.iter().map(|(name, &q)| (name, q))
    }
}
