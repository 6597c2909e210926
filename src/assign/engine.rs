//! Greedy round-robin assignment engine.
//!
//! # Algorithm
//!
//! 1. **Assign-all areas**: drain their entire candidate queue and mark
//!    them full, whether or not capacity was reached.
//! 2. **Forced reviewers**: place each one unconditionally, even when not
//!    whitelisted or not rated for the area.
//! 3. **Rounds**: sweep areas in name order; each open area pops up to its
//!    quota of candidates, stopping as soon as its capacity target and
//!    reviewer floor are met. Once every area is full (or a round makes no
//!    assignment) a final relaxed sweep runs with fullness no longer
//!    skipping areas; a relaxed round without assignments terminates.
//!
//! Every assignment removes the reviewer from all other areas' pools, so
//! each round either consumes a strictly shrinking resource or flips the
//! termination flag: the loop is bounded by the reviewer count.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{AssignConfig, CandidateIndex, RoundPlan};
use crate::models::{
    Area, AreaRoster, AreaTable, AssignedReviewer, ReviewerKey, ReviewerRegistry, Roster,
};

/// Greedy whitelist-constrained assignment.
///
/// All mutable state for one run (used set, load totals, full set, pending
/// load caps) lives inside [`assign`](AssignmentEngine::assign); the engine
/// itself only carries configuration and may be reused.
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    config: AssignConfig,
}

/// Mutable bookkeeping for one run.
struct RunState {
    used: HashSet<ReviewerKey>,
    full: BTreeSet<String>,
    caps: HashMap<ReviewerKey, u32>,
    all_areas_full: bool,
}

impl AssignmentEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run configuration.
    pub fn with_config(mut self, config: AssignConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the assignment and returns the roster.
    ///
    /// `candidates` is consumed: queues are drained as reviewers are
    /// placed. Inputs are otherwise read-only.
    pub fn assign(
        &self,
        registry: &ReviewerRegistry,
        areas: &AreaTable,
        mut candidates: CandidateIndex,
        plan: &RoundPlan,
    ) -> Roster {
        let mut rosters: BTreeMap<String, AreaRoster> = areas
            .iter()
            .map(|(name, _)| (name.clone(), AreaRoster::default()))
            .collect();
        let mut state = RunState {
            used: HashSet::new(),
            full: BTreeSet::new(),
            caps: registry
                .iter()
                .filter_map(|r| r.max_load.map(|cap| (r.key.clone(), cap)))
                .collect(),
            all_areas_full: false,
        };
        let mut all_areas_have_been_filled = false;

        tracing::debug!(areas = areas.len(), reviewers = registry.len(), "assignment started");

        // Phase 0: assign-all areas take every eligible candidate up front.
        for (name, area) in areas.iter() {
            if !area.assign_all {
                continue;
            }
            let Some(roster) = rosters.get_mut(name) else {
                continue;
            };
            while let Some(key) = candidates.pop_next(name, &state.used) {
                record(&mut state, roster, area, registry, &key);
            }
            state.full.insert(name.clone());
        }

        // Phase 1: forced reviewers, unconditionally.
        for (name, area) in areas.iter() {
            let Some(roster) = rosters.get_mut(name) else {
                continue;
            };
            for key in &area.forced {
                if state.used.contains(key) {
                    tracing::warn!(reviewer = %key, area = %name, "forced reviewer already placed elsewhere; skipped");
                    continue;
                }
                record(&mut state, roster, area, registry, key);
                if !state.all_areas_full && target_met(roster, area, self.config.min_reviewers_per_area) {
                    state.full.insert(name.clone());
                }
            }
        }

        // Phase 2: round-robin.
        loop {
            let mut assignment_made = false;
            for (name, area) in areas.iter() {
                if state.full.contains(name) && !state.all_areas_full {
                    continue;
                }
                let Some(roster) = rosters.get_mut(name) else {
                    continue;
                };
                for _ in 0..plan.quota(name) {
                    if target_met(roster, area, self.config.min_reviewers_per_area) {
                        if !state.all_areas_full {
                            state.full.insert(name.clone());
                        }
                        break;
                    }
                    let Some(key) = candidates.pop_next(name, &state.used) else {
                        continue;
                    };
                    record(&mut state, roster, area, registry, &key);
                    assignment_made = true;
                }
            }

            if state.full.len() == areas.len() && !state.all_areas_full {
                // Primary targets met everywhere; one relaxed sweep follows.
                state.all_areas_full = true;
                all_areas_have_been_filled = true;
            } else if !assignment_made && !state.all_areas_full {
                // Starved before all areas filled; relax and try once more.
                state.all_areas_full = true;
            } else if !assignment_made && state.all_areas_full {
                break;
            }
        }

        for (name, roster) in rosters.iter_mut() {
            roster.full = state.full.contains(name);
        }

        tracing::debug!(
            assigned = rosters.values().map(|r| r.reviewers.len()).sum::<usize>(),
            all_filled = all_areas_have_been_filled,
            "assignment finished"
        );

        Roster {
            areas: rosters,
            all_areas_filled: all_areas_have_been_filled,
        }
    }
}

/// Whether an area has met both its capacity target and reviewer floor.
fn target_met(roster: &AreaRoster, area: &Area, min_reviewers: usize) -> bool {
    roster.load_units >= area.required_review_units() && roster.reviewers.len() >= min_reviewers
}

/// Places one reviewer: applies the personal load cap, updates the used
/// set and the area's running load total.
///
/// A cap below the area load binds and stays recorded (it is the
/// reviewer's real ceiling and is surfaced in the output table); a cap at
/// or above the area load carried no information here and is dropped.
fn record(
    state: &mut RunState,
    roster: &mut AreaRoster,
    area: &Area,
    registry: &ReviewerRegistry,
    key: &str,
) {
    state.used.insert(key.to_string());
    let Some(reviewer) = registry.get(key) else {
        tracing::warn!(reviewer = %key, area = %area.name, "assignment target missing from registry; skipped");
        return;
    };

    let (load, capped) = match state.caps.get(key) {
        Some(&cap) if cap < area.reviewer_load => {
            tracing::debug!(
                reviewer = %key,
                area = %area.name,
                cap,
                area_load = area.reviewer_load,
                "personal load cap binds"
            );
            (cap, true)
        }
        Some(_) => {
            state.caps.remove(key);
            (area.reviewer_load, false)
        }
        None => (area.reviewer_load, false),
    };

    roster.load_units += load;
    roster.reviewers.push(AssignedReviewer {
        key: key.to_string(),
        name: reviewer.name.clone(),
        email: reviewer.email.clone(),
        load,
        capped,
    });
}
