//! Assignment quality metrics.
//!
//! Computes coverage and choice-satisfaction indicators from a completed
//! roster. Pure read-only consumer: nothing here mutates the assignment.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | assigned load units / (paper load × paper count) |
//! | Capacity | assigned load units / paper load (papers reviewable) |
//! | Avg rating | mean preference rating over rated assignments |
//! | Choice counts | assignments by first / second / no choice |

use serde::{Deserialize, Serialize};

use crate::models::{AreaTable, Rating, ReviewerKey, ReviewerRegistry, Roster};

/// Coverage summary for one area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCoverage {
    /// Area name.
    pub area: String,
    /// Reviewers assigned.
    pub reviewer_count: usize,
    /// Review units accumulated (sum of effective loads).
    pub load_units: u32,
    /// Papers the assigned reviewers can cover: `load_units / paper_load`.
    pub max_review_capacity: u32,
    /// Papers actually submitted.
    pub papers: u32,
    /// `load_units / (paper_load * paper_count) * 100`; below 100 means the
    /// area is short of reviewers.
    pub coverage_pct: f64,
    /// Whether the engine marked the area full.
    pub full: bool,
}

impl AreaCoverage {
    /// Whether the area fell short of full coverage.
    pub fn is_short(&self) -> bool {
        self.coverage_pct < 100.0
    }
}

/// Aggregate statistics over a finished assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStats {
    /// Per-area coverage, in area-name order.
    pub per_area: Vec<AreaCoverage>,
    /// Mean preference rating over assignments with a rating (0 when none).
    pub average_rating: f64,
    /// Assignments where the reviewer had rated the area first choice.
    pub first_choice: usize,
    /// Assignments where the reviewer had rated the area second choice.
    pub second_choice: usize,
    /// Assignments with no rating for the area (forced placements).
    pub no_choice: usize,
    /// Total assignments.
    pub assigned_total: usize,
    /// Total reviewers in the registry.
    pub total_reviewers: usize,
    /// Registered reviewers left without an assignment, in signup order.
    pub unassigned: Vec<ReviewerKey>,
    /// Whether every area was simultaneously full at some point.
    pub all_areas_filled: bool,
    /// Areas that never reached their target, in name order.
    pub unfilled_areas: Vec<String>,
}

impl AssignmentStats {
    /// Computes statistics from a roster and its inputs.
    pub fn calculate(roster: &Roster, registry: &ReviewerRegistry, areas: &AreaTable) -> Self {
        let mut per_area = Vec::new();
        for (name, area_roster) in roster.iter() {
            let Some(area) = areas.get(name) else {
                continue;
            };
            let required = area.required_review_units();
            let coverage_pct = if required == 0 {
                100.0
            } else {
                area_roster.load_units as f64 / required as f64 * 100.0
            };
            let max_review_capacity = if area.paper_load == 0 {
                0
            } else {
                area_roster.load_units / area.paper_load
            };
            per_area.push(AreaCoverage {
                area: name.clone(),
                reviewer_count: area_roster.reviewer_count(),
                load_units: area_roster.load_units,
                max_review_capacity,
                papers: area.paper_count,
                coverage_pct,
                full: area_roster.full,
            });
        }

        let mut first_choice = 0;
        let mut second_choice = 0;
        let mut no_choice = 0;
        let mut rating_sum = 0u32;
        for (name, area_roster) in roster.iter() {
            for assigned in &area_roster.reviewers {
                let rating = registry.get(&assigned.key).and_then(|r| r.rating_for(name));
                match rating {
                    Some(Rating::First) => {
                        first_choice += 1;
                        rating_sum += 1;
                    }
                    Some(Rating::Second) => {
                        second_choice += 1;
                        rating_sum += 2;
                    }
                    None => no_choice += 1,
                }
            }
        }
        let rated = first_choice + second_choice;
        let average_rating = if rated == 0 {
            0.0
        } else {
            rating_sum as f64 / rated as f64
        };

        let unassigned: Vec<ReviewerKey> = registry
            .iter()
            .filter(|r| !roster.contains_reviewer(&r.key))
            .map(|r| r.key.clone())
            .collect();

        Self {
            per_area,
            average_rating,
            first_choice,
            second_choice,
            no_choice,
            assigned_total: roster.assigned_count(),
            total_reviewers: registry.len(),
            unassigned,
            all_areas_filled: roster.all_areas_filled,
            unfilled_areas: roster
                .unfilled_areas()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
