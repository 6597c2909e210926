//! Area constraint model.
//!
//! An area is one subject track with its own paper count, review loads,
//! whitelist, and overrides. `AreaTable` keys areas by lower-cased name in
//! a `BTreeMap`, which fixes the round-robin and reporting order to
//! lexicographic — the engine's determinism depends on this.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::ReviewerKey;

/// One subject area and its assignment constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    /// Area name (lower-cased identity).
    pub name: String,
    /// Number of submitted papers.
    pub paper_count: u32,
    /// Papers one reviewer at full load reviews for this area.
    pub reviewer_load: u32,
    /// Reviewers required per paper.
    pub paper_load: u32,
    /// Reviewer keys approved by the area chair. Ignored in accept-all mode.
    pub whitelist: HashSet<ReviewerKey>,
    /// Reviewers placed here regardless of preference or whitelist.
    pub forced: BTreeSet<ReviewerKey>,
    /// Priority areas receive a quota multiplier each round.
    pub is_priority: bool,
    /// Drain the area's entire candidate list up front and mark it full.
    pub assign_all: bool,
}

impl Area {
    /// Creates an area; the name is lower-cased.
    pub fn new(name: impl Into<String>, paper_count: u32, reviewer_load: u32, paper_load: u32) -> Self {
        Self {
            name: name.into().to_lowercase(),
            paper_count,
            reviewer_load,
            paper_load,
            whitelist: HashSet::new(),
            forced: BTreeSet::new(),
            is_priority: false,
            assign_all: false,
        }
    }

    /// Adds a whitelisted reviewer.
    pub fn with_whitelisted(mut self, key: impl Into<ReviewerKey>) -> Self {
        self.whitelist.insert(key.into());
        self
    }

    /// Adds a forced reviewer.
    pub fn with_forced(mut self, key: impl Into<ReviewerKey>) -> Self {
        self.forced.insert(key.into());
        self
    }

    /// Marks the area as priority.
    pub fn with_priority(mut self) -> Self {
        self.is_priority = true;
        self
    }

    /// Marks the area as assign-all.
    pub fn with_assign_all(mut self) -> Self {
        self.assign_all = true;
        self
    }

    /// Total reviewer-paper slots this area needs:
    /// `paper_count * paper_load`.
    #[inline]
    pub fn required_review_units(&self) -> u32 {
        self.paper_count * self.paper_load
    }
}

/// All areas for one assignment run, ordered by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaTable {
    areas: BTreeMap<String, Area>,
}

impl AreaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an area, keyed by its (lower-cased) name.
    pub fn insert(&mut self, area: Area) {
        self.areas.insert(area.name.clone(), area);
    }

    /// Looks up an area by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Area> {
        self.areas.get(&name.to_lowercase())
    }

    /// Mutable lookup, for applying run options (priority, assign-all).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Area> {
        self.areas.get_mut(&name.to_lowercase())
    }

    /// Whether an area exists.
    pub fn contains(&self, name: &str) -> bool {
        self.areas.contains_key(&name.to_lowercase())
    }

    /// Iterates areas in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Area)> {
        self.areas.iter()
    }

    /// Area names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.areas.keys()
    }

    /// Number of areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// One parsed whitelist file, before resolution against the registry.
///
/// Produced by the whitelist loader; consumed by
/// [`validation::build_area_table`](crate::validation::build_area_table),
/// which resolves entries to reviewer keys and reports configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistSpec {
    /// Area name (lower-cased).
    pub area: String,
    /// Papers per reviewer for this area.
    pub reviewer_load: u32,
    /// Reviewers per paper for this area.
    pub paper_load: u32,
    /// Whitelist and forced entries in file order.
    pub entries: Vec<WhitelistEntry>,
}

/// One `name\temail` line of a whitelist file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// Name as written by the area chair (informational only).
    pub name: String,
    /// Email used to resolve the reviewer (lower-cased).
    pub email: String,
    /// `*`-prefixed entries force the reviewer into the area.
    pub forced: bool,
}
