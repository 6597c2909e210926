//! Identity-resolved reviewer store.
//!
//! Signup sheets routinely contain the same person twice (resubmitted form,
//! second browser, corrected typo). The registry resolves every incoming row
//! to a canonical reviewer before any preference processing happens: rows
//! sharing an email, or sharing a normalized display name, merge into one
//! reviewer keeping the better rating per area. Merges are reported as
//! data-quality warnings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AreaChoice, Reviewer, ReviewerKey};

/// Insertion-ordered store of deduplicated reviewers.
///
/// Iteration order is signup order, which downstream consumers rely on for
/// deterministic candidate tie-breaking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewerRegistry {
    reviewers: Vec<Reviewer>,
    #[serde(skip)]
    by_key: HashMap<ReviewerKey, usize>,
    #[serde(skip)]
    by_email: HashMap<String, usize>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl ReviewerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one signup row, merging with an existing reviewer when the
    /// email or the normalized display name matches.
    ///
    /// Merge policy: per area the better (lower) rating wins; a load cap on
    /// the new row replaces any earlier one; the first row's identity
    /// (name, email, key) is canonical, though later emails still resolve.
    /// Returns the canonical key the row resolved to.
    pub fn insert(
        &mut self,
        name: &str,
        email: &str,
        max_load: Option<u32>,
        choices: Vec<AreaChoice>,
    ) -> ReviewerKey {
        let email_norm = email.trim().to_lowercase();
        let name_norm = normalize_name(name);

        let existing_idx = self
            .by_email
            .get(&email_norm)
            .or_else(|| {
                if name_norm.is_empty() {
                    None
                } else {
                    self.by_name.get(&name_norm)
                }
            })
            .copied();

        if let Some(idx) = existing_idx {
            tracing::warn!(
                name,
                email = %email_norm,
                "duplicate reviewer row merged into existing signup"
            );
            // A second email for the same person still resolves to them.
            self.by_email.entry(email_norm).or_insert(idx);
            let existing = &mut self.reviewers[idx];
            for choice in choices {
                existing.merge_choice(choice);
            }
            if max_load.is_some() {
                existing.max_load = max_load;
            }
            return existing.key.clone();
        }

        let mut reviewer = Reviewer::new(name, email_norm.clone());
        reviewer.max_load = max_load;
        for choice in choices {
            reviewer.merge_choice(choice);
        }

        let key = reviewer.key.clone();
        let idx = self.reviewers.len();
        self.by_key.insert(key.clone(), idx);
        self.by_email.insert(email_norm, idx);
        if !name_norm.is_empty() {
            self.by_name.insert(name_norm, idx);
        }
        self.reviewers.push(reviewer);
        key
    }

    /// Looks up a reviewer by canonical key.
    pub fn get(&self, key: &str) -> Option<&Reviewer> {
        self.by_key.get(key).map(|&idx| &self.reviewers[idx])
    }

    /// Resolves an email address to a reviewer key.
    pub fn key_for_email(&self, email: &str) -> Option<&ReviewerKey> {
        self.by_email
            .get(&email.trim().to_lowercase())
            .map(|&idx| &self.reviewers[idx].key)
    }

    /// Iterates reviewers in signup order.
    pub fn iter(&self) -> impl Iterator<Item = &Reviewer> {
        self.reviewers.iter()
    }

    /// Number of distinct reviewers.
    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }

    /// Whether a key resolves to a registered reviewer.
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Rebuilds the lookup indexes after deserialization.
    pub fn reindex(&mut self) {
        self.by_key.clear();
        self.by_email.clear();
        self.by_name.clear();
        for (idx, r) in self.reviewers.iter().enumerate() {
            self.by_key.insert(r.key.clone(), idx);
            self.by_email.insert(r.email.clone(), idx);
            let name_norm = normalize_name(&r.name);
            if !name_norm.is_empty() {
                self.by_name.insert(name_norm, idx);
            }
        }
    }
}

/// Lower-cased, whitespace-collapsed display name.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
