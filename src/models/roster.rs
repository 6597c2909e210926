//! Roster (solution) model.
//!
//! A roster is the complete result of one assignment run: per area, the
//! reviewers placed there with their effective loads, plus the fullness
//! bookkeeping the engine accumulated on the way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ReviewerKey;

/// One reviewer placed in one area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedReviewer {
    /// Canonical reviewer key.
    pub key: ReviewerKey,
    /// Display name.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Papers this reviewer will review here (after any personal cap).
    pub load: u32,
    /// Whether a personal load cap was the limiting factor.
    pub capped: bool,
}

/// Assignment result for a single area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRoster {
    /// Reviewers in assignment order.
    pub reviewers: Vec<AssignedReviewer>,
    /// Sum of effective loads assigned so far (review units).
    pub load_units: u32,
    /// Whether the area reached its capacity target and reviewer floor.
    pub full: bool,
}

impl AreaRoster {
    /// Number of assigned reviewers.
    pub fn reviewer_count(&self) -> usize {
        self.reviewers.len()
    }

    /// Whether a reviewer key is assigned to this area.
    pub fn contains(&self, key: &str) -> bool {
        self.reviewers.iter().any(|r| r.key == key)
    }
}

/// The complete area → reviewers assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Per-area results, ordered by area name.
    pub areas: BTreeMap<String, AreaRoster>,
    /// Whether every area was simultaneously full at some point in the run.
    pub all_areas_filled: bool,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for one area.
    pub fn area(&self, name: &str) -> Option<&AreaRoster> {
        self.areas.get(&name.to_lowercase())
    }

    /// Iterates per-area results in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AreaRoster)> {
        self.areas.iter()
    }

    /// Total number of assignments across all areas.
    pub fn assigned_count(&self) -> usize {
        self.areas.values().map(|a| a.reviewers.len()).sum()
    }

    /// Whether the reviewer is assigned anywhere.
    pub fn contains_reviewer(&self, key: &str) -> bool {
        self.areas.values().any(|a| a.contains(key))
    }

    /// The area a reviewer was assigned to, if any.
    pub fn area_of(&self, key: &str) -> Option<&str> {
        self.areas
            .iter()
            .find(|(_, a)| a.contains(key))
            .map(|(name, _)| name.as_str())
    }

    /// Names of areas that never reached their target.
    pub fn unfilled_areas(&self) -> Vec<&str> {
        self.areas
            .iter()
            .filter(|(_, a)| !a.full)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        roster.areas.insert(
            "parsing".into(),
            AreaRoster {
                reviewers: vec![AssignedReviewer {
                    key: "ada_ada@x.org".into(),
                    name: "Ada".into(),
                    email: "ada@x.org".into(),
                    load: 5,
                    capped: false,
                }],
                load_units: 5,
                full: true,
            },
        );
        roster.areas.insert("semantics".into(), AreaRoster::default());
        roster
    }

    #[test]
    fn test_queries() {
        let roster = sample_roster();
        assert_eq!(roster.assigned_count(), 1);
        assert!(roster.contains_reviewer("ada_ada@x.org"));
        assert_eq!(roster.area_of("ada_ada@x.org"), Some("parsing"));
        assert_eq!(roster.area_of("nobody"), None);
        assert_eq!(roster.unfilled_areas(), vec!["semantics"]);
    }

    #[test]
    fn test_area_lookup_case_insensitive() {
        let roster = sample_roster();
        assert!(roster.area("Parsing").is_some());
        assert_eq!(roster.area("parsing").unwrap().load_units, 5);
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        assert_eq!(roster.assigned_count(), 0);
        assert!(!roster.contains_reviewer("anyone"));
        assert!(roster.unfilled_areas().is_empty());
    }
}
